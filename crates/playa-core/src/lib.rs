//! Playa Core - Ring Layout and Universe Packing
//!
//! This crate contains the domain model for the playa base field:
//! - Venue configuration and validation
//! - Ring/aisle placement of light bases
//! - Greedy packing of bases into DMX universes
//! - The single-pass driver producing a [`LayoutResult`]
//!
//! ## Quick Start
//!
//! ```rust
//! use playa_core::{generate, VenueConfig};
//!
//! let result = generate(&VenueConfig::default()).unwrap();
//! assert!(result.placements.len() >= 436);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod packing;
pub mod result;

pub use config::{DerivedConstants, VenueConfig, FEET, MAX_BASES};
pub use error::{LayoutError, Result};
pub use layout::{FixturePlacement, Region, RingGeometry, RingLayoutEngine, YINYANG_TAG};
pub use packing::{pack, AddressUnit, ChannelPacker, FrameDescriptor, DMX_UNIVERSE_SIZE};
pub use result::{generate, LayoutResult, LayoutSummary};
