//! Polar coordinate dump used when surveying the field.
//!
//! One line per base:
//! `baseId:<1-based id>,ring:<ring>,section:<aisle>,angle:<degrees>,radius:<feet>'<inches>"`

use crate::error::Result;
use playa_core::{FixturePlacement, FEET};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default dump file name
pub const DEFAULT_DUMP_FILE: &str = "polarCoordinates.txt";

/// Buffered dump file. Flushed on [`DebugDump::finish`]; dropping it flushes
/// on a best-effort basis and closes the handle.
pub struct DebugDump {
    writer: BufWriter<File>,
    path: PathBuf,
    lines: usize,
}

impl DebugDump {
    /// Create (truncate) the dump file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            lines: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_placement(&mut self, placement: &FixturePlacement) -> Result<()> {
        writeln!(self.writer, "{}", format_line(placement))?;
        self.lines += 1;
        Ok(())
    }

    /// Flush and close, returning the number of lines written
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.lines)
    }
}

/// Dump every placement to `path`
pub fn dump_placements(path: &Path, placements: &[FixturePlacement]) -> Result<usize> {
    let mut dump = DebugDump::create(path)?;
    for placement in placements {
        dump.write_placement(placement)?;
    }
    dump.finish()
}

/// Format one dump line
pub fn format_line(placement: &FixturePlacement) -> String {
    let (feet, inches) = feet_and_inches(placement.radius);
    format!(
        "baseId:{},ring:{},section:{},angle:{},radius:{}'{}\"",
        placement.index + 1,
        placement.ring,
        placement.section,
        wrapped_degrees(placement.angle),
        feet,
        inches
    )
}

/// Degrees rounded half-to-even, wrapped into 0..360
pub fn wrapped_degrees(angle: f64) -> i64 {
    (angle.to_degrees().round_ties_even() as i64).rem_euclid(360)
}

/// Whole feet and remaining whole inches of a length in inches
pub fn feet_and_inches(length: f64) -> (i64, i64) {
    (
        (length / FEET).floor() as i64,
        length.rem_euclid(FEET).floor() as i64,
    )
}
