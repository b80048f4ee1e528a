//! AI domain: time-windowed damage application and next-action decision points.

/// Hit-test gate for one attack-state instance.
///
/// Keyed to the action's normalized progress, not wall clock. Damage is
/// applied at most `max_hits` times per instance; the latch re-arms only by
/// constructing a fresh window on state re-entry.
#[derive(Debug, Clone, Copy)]
pub struct DamageWindow {
    /// Progress fraction at which hit tests open.
    pub open: f32,
    /// Progress fraction at which hit tests close.
    pub close: f32,
    max_hits: u8,
    hits_dealt: u8,
    /// Minimum progress between successive hits for multi-hit windows.
    hit_spacing: f32,
    last_hit_progress: f32,
}

impl DamageWindow {
    /// Single-application window: one qualifying hit latches it.
    pub fn single(open: f32, close: f32) -> Self {
        Self::multi(open, close, 1, 0.0)
    }

    /// Multi-hit window applying up to `max_hits`, spaced by `hit_spacing`
    /// progress fraction between pulses.
    pub fn multi(open: f32, close: f32, max_hits: u8, hit_spacing: f32) -> Self {
        Self {
            open,
            close,
            max_hits: max_hits.max(1),
            hits_dealt: 0,
            hit_spacing,
            last_hit_progress: f32::NEG_INFINITY,
        }
    }

    /// Whether a hit test may run at this progress fraction.
    pub fn should_test(&self, progress: f32) -> bool {
        if self.hits_dealt >= self.max_hits {
            return false;
        }
        if progress < self.open || progress > self.close {
            return false;
        }
        progress - self.last_hit_progress >= self.hit_spacing
    }

    /// Latch one damage application at the given progress.
    pub fn record_hit(&mut self, progress: f32) {
        self.hits_dealt = self.hits_dealt.saturating_add(1);
        self.last_hit_progress = progress;
    }

    pub fn hits_dealt(&self) -> u8 {
        self.hits_dealt
    }

    /// All allowed applications have happened.
    pub fn spent(&self) -> bool {
        self.hits_dealt >= self.max_hits
    }
}

/// Which of the two per-instance decision evaluations is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionAt {
    /// Early lookahead threshold, allowing chained attacks to queue.
    Early,
    /// Near-completion fallback.
    Late,
}

/// The twice-per-instance next-action evaluation schedule.
///
/// Whichever evaluation fires first and produces a decision settles the
/// pair; an evaluation that produces nothing leaves the later one armed.
#[derive(Debug, Clone, Copy)]
pub struct DecisionPoints {
    early: f32,
    late: f32,
    settled: bool,
}

impl DecisionPoints {
    pub fn new(early: f32, late: f32) -> Self {
        Self {
            early: early.min(late),
            late,
            settled: false,
        }
    }

    /// Which evaluation is due at this progress, if any remains.
    pub fn due(&self, progress: f32) -> Option<DecisionAt> {
        if self.settled {
            return None;
        }
        if progress >= self.late {
            Some(DecisionAt::Late)
        } else if progress >= self.early {
            Some(DecisionAt::Early)
        } else {
            None
        }
    }

    /// A decision was produced; suppress the remaining evaluation.
    pub fn settle(&mut self) {
        self.settled = true;
    }

    pub fn settled(&self) -> bool {
        self.settled
    }
}

/// Damage dealt by one application of an attack.
///
/// `base + floor(combo * bonus)`, never below 1, scaled by the elite phase
/// factor where one applies.
pub fn damage_amount(base: f32, combo_bonus: f32, combo_count: u8, phase_scale: f32) -> f32 {
    let amount = base + (combo_count as f32 * combo_bonus).floor();
    (amount * phase_scale).max(1.0)
}
