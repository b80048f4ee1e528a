//! Action playback: named actions with a normalized progress counter.
//!
//! The AI core never inspects animation internals; it plays a named action
//! and reads back a [0, 1] completion fraction to gate damage windows and
//! next-action decisions.

use bevy::prelude::*;

/// Component driving the current action of an entity.
///
/// Progress is the action's own elapsed/duration ratio, advanced by
/// `tick_action_players`. Not wall-clock and not frame-engine time, so a
/// re-entered action always restarts from zero.
#[derive(Component, Debug, Clone)]
pub struct ActionPlayer {
    /// Name of the action currently playing (e.g. "idle", "strike").
    pub action: String,
    /// Seconds elapsed since the action started.
    pub elapsed: f32,
    /// Nominal duration of the action in seconds.
    pub duration: f32,
    /// Looping actions wrap; one-shot actions latch `finished`.
    pub looping: bool,
    /// Set once a non-looping action has run its full duration.
    pub finished: bool,
}

impl Default for ActionPlayer {
    fn default() -> Self {
        Self {
            action: "idle".to_string(),
            elapsed: 0.0,
            duration: 1.0,
            looping: true,
            finished: false,
        }
    }
}

impl ActionPlayer {
    /// Start a one-shot action, resetting progress.
    pub fn play(&mut self, action: &str, duration: f32) {
        self.action = action.to_string();
        self.elapsed = 0.0;
        // Zero-length actions finish immediately rather than dividing by zero.
        self.duration = duration.max(f32::EPSILON);
        self.looping = false;
        self.finished = duration <= 0.0;
    }

    /// Start a looping action (idle/walk/run cycles).
    pub fn play_looping(&mut self, action: &str, duration: f32) {
        self.play(action, duration);
        self.looping = true;
        self.finished = false;
    }

    /// Normalized completion of the current action, clamped to [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    fn advance(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            if self.looping {
                self.elapsed %= self.duration;
            } else {
                self.elapsed = self.duration;
                self.finished = true;
            }
        }
    }
}

/// Advance every action player by the frame delta.
pub(crate) fn tick_action_players(time: Res<Time>, mut query: Query<&mut ActionPlayer>) {
    let dt = time.delta_secs();
    for mut player in &mut query {
        player.advance(dt);
    }
}

pub struct AnimPlugin;

impl Plugin for AnimPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, tick_action_players);
    }
}

#[cfg(test)]
mod tests {
    use super::ActionPlayer;

    #[test]
    fn test_progress_is_normalized_and_clamped() {
        let mut player = ActionPlayer::default();
        player.play("strike", 2.0);
        assert_eq!(player.progress(), 0.0);

        player.advance(0.5);
        assert!((player.progress() - 0.25).abs() < 1e-6);

        player.advance(10.0);
        assert_eq!(player.progress(), 1.0);
        assert!(player.finished());
    }

    #[test]
    fn test_replay_rearms_progress() {
        let mut player = ActionPlayer::default();
        player.play("strike", 1.0);
        player.advance(2.0);
        assert!(player.finished());

        player.play("strike", 1.0);
        assert_eq!(player.progress(), 0.0);
        assert!(!player.finished());
    }

    #[test]
    fn test_looping_action_never_finishes() {
        let mut player = ActionPlayer::default();
        player.play_looping("walk", 1.0);
        player.advance(3.7);
        assert!(!player.finished());
        assert!(player.progress() < 1.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut player = ActionPlayer::default();
        player.play("blink", 0.0);
        assert!(player.finished());
        assert!(player.progress().is_finite());
    }
}
