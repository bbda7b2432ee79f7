use playa_core::{
    generate, LayoutError, Region, RingGeometry, RingLayoutEngine, VenueConfig, YINYANG_TAG,
};

fn config_with_bases(bases: usize) -> VenueConfig {
    VenueConfig {
        bases_required: bases,
        ..Default::default()
    }
}

#[test]
fn test_reference_venue_overshoots_to_ring_end() {
    let config = VenueConfig::default();
    let placements = RingLayoutEngine::new(&config).unwrap().generate().unwrap();

    assert!(placements.len() >= 436);

    let last_ring = placements.last().unwrap().ring;
    let before_last = placements.iter().filter(|p| p.ring < last_ring).count();
    assert!(before_last < 436, "quota was already met before the last ring");

    let radius = 360.0 + 96.0 * last_ring as f64;
    let geometry = RingGeometry::at_radius(radius, &config);
    let in_last = placements.iter().filter(|p| p.ring == last_ring).count();
    assert_eq!(in_last, geometry.total_bases(config.aisles));
}

#[test]
fn test_indices_are_sequential() {
    let placements = RingLayoutEngine::new(&VenueConfig::default())
        .unwrap()
        .generate()
        .unwrap();

    for (i, placement) in placements.iter().enumerate() {
        assert_eq!(placement.index, i);
        assert_eq!(placement.tags.last().unwrap(), &format!("base{}", i));
    }
}

#[test]
fn test_tag_layout() {
    let placements = RingLayoutEngine::new(&VenueConfig::default())
        .unwrap()
        .generate()
        .unwrap();

    for placement in &placements {
        let region_tags = placement.region.tags();
        assert_eq!(&placement.tags[..region_tags.len()], region_tags);

        let mut rest = placement.tags[region_tags.len()..].iter();
        if placement.yinyang {
            assert_eq!(rest.next().unwrap(), YINYANG_TAG);
        }
        assert_eq!(rest.next().unwrap(), &format!("section{}", placement.section));
        assert_eq!(rest.next().unwrap(), &format!("ring{}", placement.ring));
        assert_eq!(rest.next().unwrap(), &format!("base{}", placement.index));
        assert!(rest.next().is_none());

        let classifiers = placement
            .tags
            .iter()
            .filter(|t| matches!(t.as_str(), "path" | "inner" | "outer" | "area"))
            .count();
        assert_eq!(classifiers, 1);
    }
}

#[test]
fn test_ring_zero_is_inner_unless_boundary() {
    let config = VenueConfig::default();
    let placements = RingLayoutEngine::new(&config).unwrap().generate().unwrap();
    let ring_bases = RingGeometry::at_radius(360.0, &config).ring_bases;

    for placement in placements.iter().filter(|p| p.ring == 0) {
        let slot = placement.index % ring_bases;
        if slot == 0 || slot == ring_bases - 1 {
            assert_eq!(placement.region, Region::Path);
        } else {
            assert_eq!(placement.region, Region::Inner);
        }
    }
}

#[test]
fn test_last_ring_flag_on_exact_fit() {
    let config = config_with_bases(1);
    let ring0 = RingGeometry::at_radius(360.0, &config).total_bases(config.aisles);
    let ring1 = RingGeometry::at_radius(456.0, &config).total_bases(config.aisles);

    // Exactly fills ring 1: ring 1 is the last ring.
    let placements = RingLayoutEngine::new(&config_with_bases(ring0 + ring1))
        .unwrap()
        .generate()
        .unwrap();
    assert_eq!(placements.len(), ring0 + ring1);
    assert!(placements
        .iter()
        .filter(|p| p.ring == 1)
        .all(|p| matches!(p.region, Region::Outer | Region::Path)));
    assert!(placements.iter().any(|p| p.region == Region::Outer));

    // One more base pushes the last ring out to ring 2.
    let placements = RingLayoutEngine::new(&config_with_bases(ring0 + ring1 + 1))
        .unwrap()
        .generate()
        .unwrap();
    assert!(placements
        .iter()
        .filter(|p| p.ring == 1)
        .all(|p| matches!(p.region, Region::Area | Region::Path)));
    assert_eq!(placements.last().unwrap().ring, 2);
}

#[test]
fn test_yinyang_aisle_zero_uses_eye_a() {
    let config = VenueConfig::default();
    let placements = RingLayoutEngine::new(&config).unwrap().generate().unwrap();

    for placement in placements.iter().filter(|p| p.section == 0) {
        let outside = placement.position.distance(config.eye_a) >= config.eye_radius;
        assert_eq!(placement.yinyang, outside, "base {}", placement.index);
    }
}

#[test]
fn test_yinyang_other_aisles_include_edges() {
    let config = VenueConfig::default();
    let placements = RingLayoutEngine::new(&config).unwrap().generate().unwrap();
    let last_ring = placements.last().unwrap().ring;

    for placement in placements.iter().filter(|p| p.section != 0) {
        let forced = placement.region == Region::Path
            || placement.ring == 0
            || placement.ring == last_ring;
        let inside = placement.position.distance(config.eye_b) < config.eye_radius;
        assert_eq!(placement.yinyang, forced || inside, "base {}", placement.index);
    }
}

#[test]
fn test_yinyang_eye_b_captures_area_bases() {
    // Move eye B onto an interior base of ring 1 so the distance check is hit.
    let mut config = config_with_bases(200);
    let probe = RingLayoutEngine::new(&config).unwrap().generate().unwrap();
    let target = probe
        .iter()
        .find(|p| p.section == 2 && p.region == Region::Area)
        .unwrap();
    config.eye_b = target.position;
    config.eye_radius = 1.0;

    let placements = RingLayoutEngine::new(&config).unwrap().generate().unwrap();
    let moved = &placements[target.index];
    assert!(moved.yinyang);
    assert!(moved.tags.iter().any(|t| t == YINYANG_TAG));
}

#[test]
fn test_positions_lie_on_ring_radius() {
    let placements = RingLayoutEngine::new(&VenueConfig::default())
        .unwrap()
        .generate()
        .unwrap();

    for placement in &placements {
        assert!((placement.position.length() - placement.radius).abs() < 1e-6);
        assert_eq!(placement.radius, 360.0 + 96.0 * placement.ring as f64);
    }
}

#[test]
fn test_one_base_per_run_is_configuration_error() {
    let config = VenueConfig {
        base_spacing: 330.0,
        ..Default::default()
    };
    assert!(matches!(
        RingLayoutEngine::new(&config),
        Err(LayoutError::Configuration(_))
    ));
    assert!(matches!(
        generate(&config),
        Err(LayoutError::Configuration(_))
    ));
}

#[test]
fn test_generation_is_deterministic() {
    let config = VenueConfig::default();
    let first = generate(&config).unwrap();
    let second = generate(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_reference_venue_snapshot() {
    let result = generate(&VenueConfig::default()).unwrap();
    let summary = result.summary();

    assert_eq!(summary.bases, 436);
    assert_eq!(summary.rings, 10);
    assert_eq!(summary.universes, 19);
    assert_eq!(summary.region_count(Region::Path), 80);
    assert_eq!(summary.region_count(Region::Inner), 8);
    assert_eq!(summary.region_count(Region::Outer), 64);
    assert_eq!(summary.region_count(Region::Area), 284);
    assert_eq!(summary.yinyang, 221);

    let first = &result.placements[0];
    assert!((first.x() - 282.91941387970127).abs() < 1e-9);
    assert!((first.z() - 222.61312910510532).abs() < 1e-9);

    let base17 = &result.placements[17];
    assert_eq!(base17.tags, vec!["area", "yinyang", "section0", "ring1", "base17"]);
    assert!((base17.x() - 260.7891410274745).abs() < 1e-9);
    assert!((base17.z() - 374.06553426124685).abs() < 1e-9);
}
