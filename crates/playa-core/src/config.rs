//! Venue configuration
//!
//! All distances share one unit (inches in the default venue). The derived
//! constants are computed once by [`VenueConfig::validate`] and never change
//! for the rest of a run.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{LayoutError, Result};
use crate::layout::RingGeometry;
use crate::packing::{AddressUnit, DMX_UNIVERSE_SIZE};

/// Inches per foot
pub const FEET: f64 = 12.0;

/// Upper bound on the requested base count and on the bases of the first ring
pub const MAX_BASES: usize = 1_000_000;

/// Immutable input parameters of one layout run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    /// Label of the generated fixture group
    pub label: String,
    /// Number of bases the layout must at least contain
    pub bases_required: usize,
    /// Addressable points on one base
    pub points_per_base: usize,
    /// Channels per point (3 = RGB)
    pub channels_per_point: usize,
    /// Diameter of the empty center circle
    pub center_diameter: f64,
    /// Distance between neighbouring bases and between rings
    pub base_spacing: f64,
    /// Art-Net target host
    pub host: String,
    /// Number of aisles cut through every ring
    pub aisles: usize,
    /// Linear width of one aisle
    pub aisle_width: f64,
    /// Angular offset added per ring so the aisles curve outward, in degrees
    pub aisle_curve_degrees: f64,
    /// Center of the first yin-yang eye (tested by aisle 0)
    pub eye_a: DVec2,
    /// Center of the second yin-yang eye (tested by all other aisles)
    pub eye_b: DVec2,
    /// Radius shared by both eyes
    pub eye_radius: f64,
    /// Channels in one transmission frame
    pub universe_size: usize,
    /// Unit of the `start`/`num` fields of emitted outputs
    pub address_unit: AddressUnit,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            label: "Rings".to_string(),
            bases_required: 436,
            points_per_base: 7,
            channels_per_point: 3,
            center_diameter: 60.0 * FEET,
            base_spacing: 8.0 * FEET,
            host: "192.168.0.60".to_string(),
            aisles: 4,
            aisle_width: 20.0 * FEET,
            aisle_curve_degrees: 10.0,
            eye_a: DVec2::new(-10.0 * FEET, 45.0 * FEET),
            eye_b: DVec2::new(10.0 * FEET, -45.0 * FEET),
            eye_radius: 14.0 * FEET,
            universe_size: DMX_UNIVERSE_SIZE,
            address_unit: AddressUnit::default(),
        }
    }
}

/// Constants derived once from a validated [`VenueConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedConstants {
    /// Radius of the first ring
    pub center_radius: f64,
    /// Channels consumed by one base
    pub channels_per_base: usize,
    /// Whole bases that fit in one universe
    pub bases_per_universe: usize,
    /// Per-ring angular offset, in radians
    pub aisle_curve: f64,
}

impl VenueConfig {
    /// Check the configuration and compute the derived constants.
    ///
    /// Rings only grow outward, so a first ring that fits at least two bases
    /// per light run guarantees every later ring does too.
    pub fn validate(&self) -> Result<DerivedConstants> {
        if self.bases_required == 0 || self.bases_required > MAX_BASES {
            return Err(LayoutError::configuration(format!(
                "bases_required must be between 1 and {}, got {}",
                MAX_BASES, self.bases_required
            )));
        }
        if self.points_per_base == 0 {
            return Err(LayoutError::configuration(
                "points_per_base must be at least 1",
            ));
        }
        if self.channels_per_point == 0 {
            return Err(LayoutError::configuration(
                "channels_per_point must be at least 1",
            ));
        }
        if self.universe_size == 0 || self.universe_size > DMX_UNIVERSE_SIZE {
            return Err(LayoutError::configuration(format!(
                "universe_size must be between 1 and {}, got {}",
                DMX_UNIVERSE_SIZE, self.universe_size
            )));
        }

        let channels_per_base = self
            .points_per_base
            .checked_mul(self.channels_per_point)
            .filter(|channels| *channels <= self.universe_size)
            .ok_or_else(|| {
                LayoutError::configuration(format!(
                    "a base of {} points x {} channels does not fit a universe of {}",
                    self.points_per_base, self.channels_per_point, self.universe_size
                ))
            })?;

        require_positive("center_diameter", self.center_diameter)?;
        require_positive("base_spacing", self.base_spacing)?;
        require_non_negative("aisle_width", self.aisle_width)?;
        require_non_negative("eye_radius", self.eye_radius)?;
        if !self.aisle_curve_degrees.is_finite() {
            return Err(LayoutError::configuration(
                "aisle_curve_degrees must be finite",
            ));
        }
        if !self.eye_a.is_finite() || !self.eye_b.is_finite() {
            return Err(LayoutError::configuration(
                "eye centers must be finite",
            ));
        }
        if self.aisles == 0 {
            return Err(LayoutError::configuration("aisles must be at least 1"));
        }
        if self.host.trim().is_empty() {
            return Err(LayoutError::configuration("host must not be empty"));
        }

        let center_radius = self.center_diameter / 2.0;
        let first = RingGeometry::at_radius(center_radius, self);
        if first.light_run <= 0.0 {
            return Err(LayoutError::configuration(format!(
                "aisles leave no room for bases on the first ring (light run {:.2})",
                first.light_run
            )));
        }
        if first.ring_bases < 2 {
            return Err(LayoutError::configuration(format!(
                "first ring light run {:.2} fits fewer than 2 bases at spacing {:.2}",
                first.light_run, self.base_spacing
            )));
        }
        first
            .ring_bases
            .checked_mul(self.aisles)
            .filter(|total| *total <= MAX_BASES)
            .ok_or_else(|| {
                LayoutError::configuration(format!(
                    "first ring light run {:.2} at spacing {:.2} holds more than {} bases",
                    first.light_run, self.base_spacing, MAX_BASES
                ))
            })?;

        Ok(DerivedConstants {
            center_radius,
            channels_per_base,
            bases_per_universe: self.universe_size / channels_per_base,
            aisle_curve: self.aisle_curve_degrees / 360.0 * 2.0 * PI,
        })
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::configuration(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::configuration(format!(
            "{} must be zero or positive, got {}",
            name, value
        )))
    }
}
