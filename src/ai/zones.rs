//! AI domain: distance-banded tactical zone classification.

/// Distance band relative to the pursuit target, ordered by aggressiveness.
///
/// The discriminant order matters: a smaller variant is a more aggressive
/// zone, so monotonicity checks can compare variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TacticalZone {
    /// Within melee commitment distance.
    Inner,
    /// Close enough to rush or lunge.
    Mid,
    /// Ranged suppression distance.
    Outer,
    /// Beyond every engagement band.
    OutOfRange,
}

/// Ascending range thresholds defining the zone bands.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ZoneThresholds {
    pub inner: f32,
    pub mid: f32,
    pub outer: f32,
}

impl ZoneThresholds {
    pub fn is_ascending(&self) -> bool {
        self.inner > 0.0 && self.inner <= self.mid && self.mid <= self.outer
    }
}

/// Map a distance to the innermost zone whose threshold it satisfies.
///
/// Pure: no hidden state. Boundaries are inclusive on the inner side, so a
/// distance exactly on a threshold selects the more aggressive zone.
pub fn classify(distance: f32, thresholds: &ZoneThresholds) -> TacticalZone {
    if distance <= thresholds.inner {
        TacticalZone::Inner
    } else if distance <= thresholds.mid {
        TacticalZone::Mid
    } else if distance <= thresholds.outer {
        TacticalZone::Outer
    } else {
        TacticalZone::OutOfRange
    }
}

/// Caller-side dwell bookkeeping for the pure classifier.
///
/// Zone entry timestamps are stamped only when the observed zone changes
/// (and on reset when a state re-enters); executing a tactic never touches
/// them. The tactic changes distance and the resulting zone change restamps
/// naturally. The Outer/Mid pair additionally shares a band timestamp so the
/// rush gate can measure continuous ranged-band dwell across the two zones.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneTracker {
    current: Option<TacticalZone>,
    entered_at: f32,
    band_since: Option<f32>,
}

impl ZoneTracker {
    /// Forget all dwell state (entering Idle/Patrol, re-entering Chase).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record this tick's classification, stamping entry times on change.
    pub fn observe(&mut self, zone: TacticalZone, now: f32) {
        if self.current != Some(zone) {
            self.current = Some(zone);
            self.entered_at = now;
        }
        let in_band = matches!(zone, TacticalZone::Mid | TacticalZone::Outer);
        match (in_band, self.band_since) {
            (true, None) => self.band_since = Some(now),
            (false, Some(_)) => self.band_since = None,
            _ => {}
        }
    }

    pub fn current(&self) -> Option<TacticalZone> {
        self.current
    }

    /// Seconds spent continuously in the current zone.
    pub fn dwell(&self, now: f32) -> f32 {
        if self.current.is_some() {
            (now - self.entered_at).max(0.0)
        } else {
            0.0
        }
    }

    /// Seconds spent continuously anywhere in the Outer/Mid band.
    pub fn band_dwell(&self, now: f32) -> f32 {
        match self.band_since {
            Some(since) => (now - since).max(0.0),
            None => 0.0,
        }
    }
}
