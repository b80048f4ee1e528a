//! Validation of archetype definitions before they enter the registry.

use crate::ai::profile::AttackKind;
use crate::content::data::ArchetypeDef;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub archetype: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Archetype '{}' field '{}': {}",
            self.archetype, self.field, self.message
        )
    }
}

macro_rules! check {
    ($errors:expr, $def:expr, $field:expr, $cond:expr, $($msg:tt)*) => {
        if !$cond {
            $errors.push(ValidationError {
                archetype: $def.id.clone(),
                field: $field,
                message: format!($($msg)*),
            });
        }
    };
}

/// Validate one archetype definition. Empty result means it is usable.
pub fn validate_archetype(def: &ArchetypeDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check!(errors, def, "max_health", def.max_health > 0.0, "must be positive");
    check!(
        errors,
        def,
        "ranges.zones",
        def.ranges.zones.is_ascending(),
        "thresholds must ascend inner <= mid <= outer"
    );
    check!(
        errors,
        def,
        "ranges.attack",
        def.ranges.attack > 0.0 && def.ranges.attack <= def.ranges.secondary,
        "attack range must be positive and no larger than the secondary range"
    );
    check!(
        errors,
        def,
        "combo.chance",
        (0.0..=1.0).contains(&def.combo.chance),
        "must be a probability"
    );
    check!(
        errors,
        def,
        "closing_chance",
        (0.0..=1.0).contains(&def.closing_chance),
        "must be a probability"
    );
    check!(errors, def, "combo.max_count", def.combo.max_count >= 1, "must allow at least one attack");
    check!(
        errors,
        def,
        "aggression",
        def.aggression.base > 0.0 && def.aggression.base <= def.aggression.max,
        "base must be positive and no larger than max"
    );

    for spec in &def.attacks {
        check!(
            errors,
            def,
            "attacks.duration",
            spec.duration > 0.0,
            "{:?} needs a positive duration",
            spec.kind
        );
        check!(
            errors,
            def,
            "attacks.window",
            0.0 <= spec.window_open && spec.window_open <= spec.window_close && spec.window_close <= 1.0,
            "{:?} window must satisfy 0 <= open <= close <= 1",
            spec.kind
        );
        check!(
            errors,
            def,
            "attacks.max_hits",
            spec.max_hits >= 1,
            "{:?} must allow at least one hit",
            spec.kind
        );
    }

    let mut referenced: Vec<AttackKind> = def.melee_chain.clone();
    referenced.extend(def.closing_attack);
    referenced.extend(def.suppress_attack);
    for kind in referenced {
        check!(
            errors,
            def,
            "attacks",
            def.attacks.iter().any(|spec| spec.kind == kind),
            "referenced kind {:?} has no attack spec",
            kind
        );
    }

    let needs_projectiles = def.attacks.iter().any(|spec| spec.kind.is_projectile());
    check!(
        errors,
        def,
        "projectile",
        !needs_projectiles || def.projectile.is_some(),
        "projectile attacks require a projectile spec"
    );

    let mut last_frac = 1.0;
    for phase in &def.phases {
        check!(
            errors,
            def,
            "phases",
            phase.health_frac > 0.0 && phase.health_frac < last_frac,
            "phase thresholds must descend within (0, 1)"
        );
        last_frac = phase.health_frac;
    }

    errors
}
