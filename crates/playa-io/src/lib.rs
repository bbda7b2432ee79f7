//! Playa I/O - config files, output documents and the debug dump
//!
//! This crate handles everything that touches the filesystem or a wire
//! format:
//! - **Config files**: venue and logging settings in TOML, RON or JSON
//! - **Output document**: the fixture group consumed by the lighting software
//! - **Debug dump**: polar coordinates of every base, one line each

pub mod config_file;
pub mod debug_dump;
pub mod error;
pub mod format;

pub use config_file::ConfigFile;
pub use debug_dump::{dump_placements, DebugDump, DEFAULT_DUMP_FILE};
pub use error::{IoError, Result};
pub use format::{LayoutDocument, LAYOUT_FORMAT_VERSION};
