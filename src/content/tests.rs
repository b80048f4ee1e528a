//! Content domain: tests for loading, validation, and conversion.

use std::path::Path;

use super::loader;
use super::registry::ArchetypeRegistry;
use super::validation::validate_archetype;
use crate::ai::profile::{AiProfile, Role};

#[test]
fn test_shipped_content_parses_and_validates() {
    let (defs, defaults) =
        loader::load_all_content(Path::new("assets/data")).expect("shipped content loads");
    assert_eq!(defs.len(), 5);
    assert!(defaults.projectile_pool_size > 0);

    for def in &defs {
        let errors = validate_archetype(def);
        assert!(
            errors.is_empty(),
            "'{}' failed validation: {:?}",
            def.id,
            errors
        );
    }
}

#[test]
fn test_shipped_elite_matches_builtin_shape() {
    let (defs, _) =
        loader::load_all_content(Path::new("assets/data")).expect("shipped content loads");
    let registry = ArchetypeRegistry::from_defs(defs.iter());

    let elite = registry.profile("marrow_king").expect("elite present");
    assert_eq!(elite.role, Role::Elite);
    assert_eq!(elite.phases.len(), 2);
    assert!(elite.suppress_attack.is_some());
    assert!(elite.zones.is_ascending());
}

#[test]
fn test_none_chase_limits_convert_to_infinity() {
    let (defs, _) =
        loader::load_all_content(Path::new("assets/data")).expect("shipped content loads");
    let hexer = defs.iter().find(|d| d.id == "marsh_hexer").expect("hexer def");
    let profile = AiProfile::from(hexer);
    assert!(profile.dwell_before_rush.is_infinite());
    assert!(profile.melee_chase_limit.is_infinite());
}

#[test]
fn test_validation_rejects_broken_defs() {
    let (defs, _) =
        loader::load_all_content(Path::new("assets/data")).expect("shipped content loads");
    let base = defs.iter().find(|d| d.id == "bogskin_brute").expect("brute def");

    let mut descending_zones = base.clone();
    descending_zones.ranges.zones.inner = 500.0;
    assert!(!validate_archetype(&descending_zones).is_empty());

    let mut bad_window = base.clone();
    bad_window.attacks[0].window_open = 0.9;
    bad_window.attacks[0].window_close = 0.4;
    assert!(!validate_archetype(&bad_window).is_empty());

    let mut missing_spec = base.clone();
    missing_spec.attacks.clear();
    assert!(!validate_archetype(&missing_spec).is_empty());

    let mut rising_phases = base.clone();
    rising_phases.phases = vec![
        crate::ai::profile::PhaseSpec {
            health_frac: 0.3,
            aggression_bonus: 0.1,
            damage_scale: 1.1,
        },
        crate::ai::profile::PhaseSpec {
            health_frac: 0.6,
            aggression_bonus: 0.1,
            damage_scale: 1.2,
        },
    ];
    assert!(!validate_archetype(&rising_phases).is_empty());
}

#[test]
fn test_builtin_registry_covers_every_role() {
    let registry = ArchetypeRegistry::builtin();
    assert_eq!(registry.len(), 5);
    for id in ["bogskin_brute", "marsh_hexer", "dartfang", "mireshade", "marrow_king"] {
        assert!(registry.profile(id).is_some(), "missing '{}'", id);
    }
}
