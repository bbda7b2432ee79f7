//! Ring layout engine
//!
//! Places bases on concentric rings around the venue center. Every ring is cut
//! by a fixed number of aisles; the arc between two aisles (a light run) is
//! filled with evenly spaced bases, one on each end of the run. Each ring is
//! rotated a little further than the previous one so the aisles curve
//! outward.
//!
//! The engine always finishes the ring it has started, so the number of
//! placements can exceed [`VenueConfig::bases_required`].

use glam::DVec2;
use std::f64::consts::PI;

use crate::config::{DerivedConstants, VenueConfig};
use crate::error::{LayoutError, Result};

/// Tag marking bases that belong to the yin-yang overlay
pub const YINYANG_TAG: &str = "yinyang";

/// Edge/area classification of a placed base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// First or last base of a light run, next to an aisle
    Path,
    /// Interior base on the innermost ring
    Inner,
    /// Interior base on the outermost ring
    Outer,
    /// Everything else
    Area,
}

impl Region {
    /// Tags this region contributes to the front of a base's tag list
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            Self::Path => &["path", "edge"],
            Self::Inner => &["inner", "edge"],
            Self::Outer => &["outer", "edge"],
            Self::Area => &["area"],
        }
    }

    /// Classify a slot. Run boundaries win over ring boundaries.
    pub fn classify(slot: &SlotPosition) -> Self {
        if slot.is_run_boundary() {
            Self::Path
        } else if slot.ring == 0 {
            Self::Inner
        } else if slot.last_ring {
            Self::Outer
        } else {
            Self::Area
        }
    }
}

/// Where a slot sits inside the ring/aisle/run structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition {
    /// Ring index, 0 is innermost
    pub ring: usize,
    /// Aisle index within the ring
    pub section: usize,
    /// Position within the light run
    pub slot: usize,
    /// Bases in each run of this ring
    pub ring_bases: usize,
    /// Whether this ring completes the quota
    pub last_ring: bool,
}

impl SlotPosition {
    /// First or last slot of its light run
    pub fn is_run_boundary(&self) -> bool {
        self.slot == 0 || self.slot + 1 == self.ring_bases
    }
}

/// One placed base
#[derive(Debug, Clone, PartialEq)]
pub struct FixturePlacement {
    /// 0-based emission index, also the packing order
    pub index: usize,
    /// Ring index, 0 is innermost
    pub ring: usize,
    /// Aisle index within the ring
    pub section: usize,
    /// Edge/area classification
    pub region: Region,
    /// Member of the yin-yang overlay
    pub yinyang: bool,
    /// Venue position; `y` holds the z coordinate
    pub position: DVec2,
    /// Polar angle in radians (not wrapped)
    pub angle: f64,
    /// Distance from the venue center
    pub radius: f64,
    /// Region tags, then yinyang, section, ring and base tags
    pub tags: Vec<String>,
}

impl FixturePlacement {
    /// Horizontal venue coordinate
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Depth venue coordinate
    pub fn z(&self) -> f64 {
        self.position.y
    }
}

/// Per-ring geometry derived from the ring radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Ring radius
    pub radius: f64,
    /// Circumference at `radius`
    pub perimeter: f64,
    /// Arc length covered by one run of bases
    pub light_run: f64,
    /// Bases in one run, including both ends
    pub ring_bases: usize,
    /// Angle taken up by one aisle
    pub aisle_angle: f64,
    /// Angle between neighbouring bases of a run
    pub base_angle: f64,
}

impl RingGeometry {
    /// Compute the geometry of a ring of the given radius.
    ///
    /// Rounds toward more bases when the run is not an exact multiple of the
    /// spacing. `base_angle` is only meaningful when `ring_bases >= 2`.
    /// Counts saturate at `usize::MAX`; [`VenueConfig::validate`] rejects
    /// rings that large.
    pub fn at_radius(radius: f64, config: &VenueConfig) -> Self {
        let perimeter = PI * 2.0 * radius;
        let light_run = (perimeter / config.aisles as f64) - config.aisle_width;
        let ring_bases = if light_run > 0.0 {
            ((light_run / config.base_spacing) as usize).saturating_add(1)
        } else {
            0
        };
        let aisle_angle = (config.aisle_width / perimeter) * 2.0 * PI;
        let base_angle = if ring_bases >= 2 {
            ((light_run / (ring_bases - 1) as f64) / perimeter) * 2.0 * PI
        } else {
            0.0
        };

        Self {
            radius,
            perimeter,
            light_run,
            ring_bases,
            aisle_angle,
            base_angle,
        }
    }

    /// Bases this ring holds across all aisles, saturating on overflow
    pub fn total_bases(&self, aisles: usize) -> usize {
        self.ring_bases.saturating_mul(aisles)
    }
}

/// Mutable state carried from one ring to the next
#[derive(Debug, Clone, Copy)]
struct RingCursor {
    radius: f64,
    angle_offset: f64,
    ring: usize,
    remaining: usize,
    next_index: usize,
}

/// Generates base placements ring by ring
#[derive(Debug, Clone)]
pub struct RingLayoutEngine<'a> {
    config: &'a VenueConfig,
    derived: DerivedConstants,
}

impl<'a> RingLayoutEngine<'a> {
    /// Validate the configuration and build an engine for it
    pub fn new(config: &'a VenueConfig) -> Result<Self> {
        let derived = config.validate()?;
        Ok(Self { config, derived })
    }

    /// Constants computed while validating the configuration
    pub fn derived(&self) -> &DerivedConstants {
        &self.derived
    }

    /// Generate every placement, completing the ring in which the quota is met
    pub fn generate(&self) -> Result<Vec<FixturePlacement>> {
        let mut cursor = RingCursor {
            radius: self.derived.center_radius,
            angle_offset: 0.0,
            ring: 0,
            remaining: self.config.bases_required,
            next_index: 0,
        };
        let mut placements = Vec::with_capacity(self.config.bases_required);

        while cursor.remaining > 0 {
            self.emit_ring(&mut cursor, &mut placements)?;
        }

        Ok(placements)
    }

    fn emit_ring(
        &self,
        cursor: &mut RingCursor,
        placements: &mut Vec<FixturePlacement>,
    ) -> Result<()> {
        let geometry = RingGeometry::at_radius(cursor.radius, self.config);
        if geometry.ring_bases < 2 {
            return Err(LayoutError::invariant(format!(
                "ring {} fits only {} bases per run",
                cursor.ring, geometry.ring_bases
            )));
        }

        let ring_total = geometry.total_bases(self.config.aisles);
        let last_ring = cursor.remaining <= ring_total;

        tracing::debug!(
            "Ring {}: radius {:.1}, {} bases per run, {} total{}",
            cursor.ring,
            geometry.radius,
            geometry.ring_bases,
            ring_total,
            if last_ring { " (last)" } else { "" }
        );

        let mut angle = cursor.angle_offset;
        for section in 0..self.config.aisles {
            angle += geometry.aisle_angle;

            for slot in 0..geometry.ring_bases {
                let position = SlotPosition {
                    ring: cursor.ring,
                    section,
                    slot,
                    ring_bases: geometry.ring_bases,
                    last_ring,
                };
                placements.push(self.place(&position, cursor.next_index, geometry.radius, angle));

                cursor.remaining = cursor.remaining.saturating_sub(1);
                cursor.next_index += 1;
                angle += geometry.base_angle;
            }
            // Step back so the next aisle starts from the last base of this run.
            angle -= geometry.base_angle;
        }

        cursor.radius += self.config.base_spacing;
        cursor.angle_offset += self.derived.aisle_curve;
        cursor.ring += 1;
        Ok(())
    }

    fn place(
        &self,
        slot: &SlotPosition,
        index: usize,
        radius: f64,
        angle: f64,
    ) -> FixturePlacement {
        let region = Region::classify(slot);
        let position = DVec2::new(radius * angle.cos(), radius * angle.sin());
        let yinyang = self.in_yinyang(slot, position);

        let mut tags: Vec<String> = region.tags().iter().map(|t| t.to_string()).collect();
        if yinyang {
            tags.push(YINYANG_TAG.to_string());
        }
        tags.push(format!("section{}", slot.section));
        tags.push(format!("ring{}", slot.ring));
        tags.push(format!("base{}", index));

        FixturePlacement {
            index,
            ring: slot.ring,
            section: slot.section,
            region,
            yinyang,
            position,
            angle,
            radius,
            tags,
        }
    }

    /// Aisle 0 takes everything outside eye A. Other aisles take what is
    /// inside eye B plus every run boundary, the first ring and the last ring.
    fn in_yinyang(&self, slot: &SlotPosition, position: DVec2) -> bool {
        let radius = self.config.eye_radius;
        if slot.section == 0 {
            position.distance(self.config.eye_a) >= radius
        } else {
            position.distance(self.config.eye_b) < radius
                || slot.is_run_boundary()
                || slot.ring == 0
                || slot.last_ring
        }
    }
}
