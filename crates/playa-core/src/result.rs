//! Layout result and the single-pass driver

use std::collections::BTreeMap;

use crate::config::VenueConfig;
use crate::error::{LayoutError, Result};
use crate::layout::{FixturePlacement, Region, RingLayoutEngine};
use crate::packing::{AddressUnit, ChannelPacker, FrameDescriptor};

/// Everything one layout run produces
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Label of the fixture group
    pub label: String,
    /// Bases in emission order
    pub placements: Vec<FixturePlacement>,
    /// Universes in packing order
    pub frames: Vec<FrameDescriptor>,
    /// Unit for the emitted `start`/`num` fields
    pub address_unit: AddressUnit,
    /// Points per base, used by [`AddressUnit::Point`]
    pub points_per_base: usize,
}

impl LayoutResult {
    /// Human readable summary line
    pub fn comment(&self) -> String {
        format!("Num Bases {}", self.placements.len())
    }

    /// Aggregate counts for logging
    pub fn summary(&self) -> LayoutSummary {
        let mut regions = BTreeMap::new();
        for placement in &self.placements {
            *regions.entry(placement.region).or_insert(0) += 1;
        }

        LayoutSummary {
            bases: self.placements.len(),
            rings: self.placements.last().map_or(0, |p| p.ring + 1),
            universes: self.frames.len(),
            yinyang: self.placements.iter().filter(|p| p.yinyang).count(),
            regions,
        }
    }
}

/// Counts describing a finished layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSummary {
    /// Bases placed
    pub bases: usize,
    /// Rings started
    pub rings: usize,
    /// Universes used
    pub universes: usize,
    /// Bases in the yin-yang overlay
    pub yinyang: usize,
    /// Bases per region
    pub regions: BTreeMap<Region, usize>,
}

impl LayoutSummary {
    /// Bases classified as `region`
    pub fn region_count(&self, region: Region) -> usize {
        self.regions.get(&region).copied().unwrap_or(0)
    }
}

/// Run the layout engine and pack its placements into universes.
///
/// Fails before producing anything if the configuration is invalid.
pub fn generate(config: &VenueConfig) -> Result<LayoutResult> {
    let engine = RingLayoutEngine::new(config)?;
    let derived = *engine.derived();
    let placements = engine.generate()?;

    let mut packer = ChannelPacker::new(
        config.host.as_str(),
        config.universe_size,
        derived.channels_per_base,
    )?;
    for (expected, placement) in placements.iter().enumerate() {
        if placement.index != expected {
            return Err(LayoutError::invariant(format!(
                "base {} emitted at position {}",
                placement.index, expected
            )));
        }
        packer.push()?;
    }
    let frames = packer.finish()?;

    let result = LayoutResult {
        label: config.label.clone(),
        placements,
        frames,
        address_unit: config.address_unit,
        points_per_base: config.points_per_base,
    };

    let summary = result.summary();
    tracing::info!(
        "Generated {} bases ({} requested) on {} rings in {} universes",
        summary.bases,
        config.bases_required,
        summary.rings,
        summary.universes
    );
    tracing::info!(
        "Regions: path {}, inner {}, outer {}, area {}; yinyang {}",
        summary.region_count(Region::Path),
        summary.region_count(Region::Inner),
        summary.region_count(Region::Outer),
        summary.region_count(Region::Area),
        summary.yinyang
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_venue() {
        let result = generate(&VenueConfig::default()).unwrap();

        assert!(result.placements.len() >= 436);
        assert_eq!(result.comment(), format!("Num Bases {}", result.placements.len()));

        let packed: usize = result.frames.iter().map(|f| f.num).sum();
        assert_eq!(packed, result.placements.len());
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = VenueConfig {
            base_spacing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            generate(&config),
            Err(LayoutError::Configuration(_))
        ));
    }

    #[test]
    fn test_generate_rejects_unbounded_quota() {
        let config = VenueConfig {
            bases_required: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            generate(&config),
            Err(LayoutError::Configuration(_))
        ));
    }

    #[test]
    fn test_summary_counts() {
        let config = VenueConfig {
            bases_required: 16,
            ..Default::default()
        };
        let summary = generate(&config).unwrap().summary();

        // One ring of 4 runs of 4: 8 path ends, 8 inner.
        assert_eq!(summary.bases, 16);
        assert_eq!(summary.rings, 1);
        assert_eq!(summary.region_count(Region::Path), 8);
        assert_eq!(summary.region_count(Region::Inner), 8);
        assert_eq!(summary.region_count(Region::Area), 0);
        assert_eq!(summary.universes, 1);
    }
}
