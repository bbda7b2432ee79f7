//! Channel packer
//!
//! Packs bases, in emission order, into fixed-size DMX universes. A base is
//! never split across two universes: when the current universe cannot hold
//! another base's channels it is closed and a fresh one is started.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Channels in one DMX512 universe
pub const DMX_UNIVERSE_SIZE: usize = 512;

/// Unit used for the `start`/`num` fields of an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressUnit {
    /// Count whole bases
    #[default]
    Fixture,
    /// Count individual points (bases × points per base)
    Point,
}

impl std::fmt::Display for AddressUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixture => write!(f, "fixture"),
            Self::Point => write!(f, "point"),
        }
    }
}

impl std::str::FromStr for AddressUnit {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fixture" | "base" => Ok(Self::Fixture),
            "point" | "pixel" => Ok(Self::Point),
            other => Err(LayoutError::configuration(format!(
                "unknown address unit '{}'",
                other
            ))),
        }
    }
}

/// One closed universe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDescriptor {
    /// Art-Net target host
    pub host: String,
    /// Universe index, starting at 0
    pub universe: u32,
    /// Index of the first base carried in this universe
    pub start: usize,
    /// Bases carried in this universe
    pub num: usize,
}

impl FrameDescriptor {
    /// `(start, num)` expressed in the given unit
    pub fn addressed(&self, unit: AddressUnit, points_per_base: usize) -> (usize, usize) {
        match unit {
            AddressUnit::Fixture => (self.start, self.num),
            AddressUnit::Point => (self.start * points_per_base, self.num * points_per_base),
        }
    }
}

/// Greedy universe packer
#[derive(Debug, Clone)]
pub struct ChannelPacker {
    host: String,
    universe_size: usize,
    channels_per_base: usize,
    remaining: usize,
    universe: u32,
    start: usize,
    packed: usize,
    frames: Vec<FrameDescriptor>,
}

impl ChannelPacker {
    /// Create a packer for bases of `channels_per_base` channels
    pub fn new(
        host: impl Into<String>,
        universe_size: usize,
        channels_per_base: usize,
    ) -> Result<Self> {
        if channels_per_base == 0 || channels_per_base > universe_size {
            return Err(LayoutError::configuration(format!(
                "a base of {} channels cannot be packed into universes of {}",
                channels_per_base, universe_size
            )));
        }

        Ok(Self {
            host: host.into(),
            universe_size,
            channels_per_base,
            remaining: universe_size,
            universe: 0,
            start: 0,
            packed: 0,
            frames: Vec::new(),
        })
    }

    /// Admit the next base, closing the current universe first if it is full
    pub fn push(&mut self) -> Result<()> {
        if self.remaining < self.channels_per_base {
            self.close_frame()?;
        }
        self.remaining -= self.channels_per_base;
        self.packed += 1;
        Ok(())
    }

    /// Universes closed so far
    pub fn frames(&self) -> &[FrameDescriptor] {
        &self.frames
    }

    /// Flush a pending partial universe and return every descriptor
    pub fn finish(mut self) -> Result<Vec<FrameDescriptor>> {
        if self.remaining < self.universe_size {
            self.close_frame()?;
        }

        let total: usize = self.frames.iter().map(|f| f.num).sum();
        if total != self.packed {
            return Err(LayoutError::invariant(format!(
                "universes carry {} bases but {} were packed",
                total, self.packed
            )));
        }

        Ok(self.frames)
    }

    fn close_frame(&mut self) -> Result<()> {
        let num = (self.universe_size - self.remaining) / self.channels_per_base;
        if num == 0 {
            return Err(LayoutError::invariant(format!(
                "universe {} closed with no bases",
                self.universe
            )));
        }
        if num * self.channels_per_base > self.universe_size {
            return Err(LayoutError::invariant(format!(
                "universe {} overfilled with {} bases",
                self.universe, num
            )));
        }

        tracing::trace!(
            "Closing universe {} at base {} with {} bases",
            self.universe,
            self.start,
            num
        );

        self.frames.push(FrameDescriptor {
            host: self.host.clone(),
            universe: self.universe,
            start: self.start,
            num,
        });
        self.universe += 1;
        self.start += num;
        self.remaining = self.universe_size;
        Ok(())
    }
}

/// Pack `count` bases in one pass
pub fn pack(
    host: &str,
    universe_size: usize,
    channels_per_base: usize,
    count: usize,
) -> Result<Vec<FrameDescriptor>> {
    let mut packer = ChannelPacker::new(host, universe_size, channels_per_base)?;
    for _ in 0..count {
        packer.push()?;
    }
    packer.finish()
}
