//! Drift-corrected countdown.
//!
//! While running, the absolute `target_end_ms` is authoritative and the
//! remaining time is recomputed from it on every tick -- interval callbacks
//! can be delayed or coalesced (backgrounded hosts, system sleep), so
//! deriving from wall-clock deltas is what keeps long countdowns accurate.
//! While paused, the frozen `remaining_secs` is the source of truth. Those
//! are the two and only two regimes.
//!
//! Methods take `now_ms` explicitly so tests can drive virtual time.

use serde::{Deserialize, Serialize};

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running.
    Idle,
    /// Still counting down. `changed` is true when the displayed second
    /// actually moved, letting callers skip no-op redraws.
    Running { remaining_secs: u64, changed: bool },
    /// Reached zero on this tick. Reported exactly once: the countdown
    /// stops itself and produces no further ticks until re-armed.
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    running: bool,
    /// Absolute end target, epoch milliseconds. Set iff `running`.
    target_end_ms: Option<u64>,
    remaining_secs: u64,
}

impl Countdown {
    /// Create a paused countdown holding `duration_secs`.
    pub fn new(duration_secs: u64) -> Self {
        Self {
            running: false,
            target_end_ms: None,
            remaining_secs: duration_secs,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Remaining whole seconds as last observed (frozen value while
    /// paused, last tick's derivation while running).
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Start counting down `duration_secs` from `now_ms`.
    ///
    /// No-op while already running (the phase machine never reaches that
    /// call, this is the idempotence guard) and for a zero duration.
    pub fn arm_at(&mut self, duration_secs: u64, now_ms: u64) {
        if self.running || duration_secs == 0 {
            return;
        }
        self.target_end_ms = Some(now_ms.saturating_add(duration_secs.saturating_mul(1000)));
        self.remaining_secs = duration_secs;
        self.running = true;
    }

    /// Recompute remaining time from the absolute target.
    ///
    /// Returns [`Tick::Completed`] exactly once when the target has
    /// passed, no matter how many scheduled ticks were missed in between.
    pub fn tick_at(&mut self, now_ms: u64) -> Tick {
        let Some(target) = self.target_end_ms else {
            return Tick::Idle;
        };
        let remaining = remaining_secs_until(target, now_ms);
        if remaining == 0 {
            self.remaining_secs = 0;
            self.running = false;
            self.target_end_ms = None;
            return Tick::Completed;
        }
        let changed = remaining != self.remaining_secs;
        self.remaining_secs = remaining;
        Tick::Running {
            remaining_secs: remaining,
            changed,
        }
    }

    /// Freeze the countdown at its current remaining time. Idempotent.
    pub fn pause_at(&mut self, now_ms: u64) {
        let Some(target) = self.target_end_ms.take() else {
            return;
        };
        self.remaining_secs = remaining_secs_until(target, now_ms);
        self.running = false;
    }

    /// Stop and load a fresh duration. Used for explicit reset and for
    /// resynchronizing after a configuration change while paused.
    pub fn reset_to(&mut self, duration_secs: u64) {
        self.running = false;
        self.target_end_ms = None;
        self.remaining_secs = duration_secs;
    }
}

/// Whole seconds until `target_end_ms`, rounded up, clamped at zero.
fn remaining_secs_until(target_end_ms: u64, now_ms: u64) -> u64 {
    target_end_ms.saturating_sub(now_ms).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T0: u64 = 1_000_000_000_000;

    #[test]
    fn immediate_tick_shows_full_duration() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        assert_eq!(
            cd.tick_at(T0),
            Tick::Running {
                remaining_secs: 60,
                changed: false
            }
        );
    }

    #[test]
    fn derives_from_absolute_target() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        // A delayed tick sees the true remaining time, not a decrement.
        assert_eq!(
            cd.tick_at(T0 + 10_500),
            Tick::Running {
                remaining_secs: 50,
                changed: true
            }
        );
        // Sub-second remainder rounds up.
        assert_eq!(
            cd.tick_at(T0 + 59_100),
            Tick::Running {
                remaining_secs: 1,
                changed: true
            }
        );
    }

    #[test]
    fn unchanged_second_is_flagged() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        assert_eq!(
            cd.tick_at(T0 + 100),
            Tick::Running {
                remaining_secs: 60,
                changed: false
            }
        );
        assert_eq!(
            cd.tick_at(T0 + 200),
            Tick::Running {
                remaining_secs: 60,
                changed: false
            }
        );
    }

    #[test]
    fn missed_ticks_complete_exactly_once() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        // One 61s jump: completion fires once, then the countdown is idle.
        assert_eq!(cd.tick_at(T0 + 61_000), Tick::Completed);
        assert!(!cd.running());
        assert_eq!(cd.remaining_secs(), 0);
        assert_eq!(cd.tick_at(T0 + 62_000), Tick::Idle);
    }

    #[test]
    fn completes_at_exact_boundary() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        assert_eq!(cd.tick_at(T0 + 60_000), Tick::Completed);
    }

    #[test]
    fn pause_freezes_remaining() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        cd.pause_at(T0 + 10_000);
        assert!(!cd.running());
        assert_eq!(cd.remaining_secs(), 50);
        // Wall-clock time passing while paused changes nothing.
        assert_eq!(cd.tick_at(T0 + 500_000), Tick::Idle);
        assert_eq!(cd.remaining_secs(), 50);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        cd.pause_at(T0 + 10_000);
        cd.pause_at(T0 + 30_000);
        assert_eq!(cd.remaining_secs(), 50);
    }

    #[test]
    fn pause_after_target_clamps_to_zero() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        cd.pause_at(T0 + 90_000);
        assert_eq!(cd.remaining_secs(), 0);
    }

    #[test]
    fn arm_while_running_is_ignored() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        cd.arm_at(10, T0 + 1_000);
        assert_eq!(
            cd.tick_at(T0 + 1_000),
            Tick::Running {
                remaining_secs: 59,
                changed: true
            }
        );
    }

    #[test]
    fn zero_duration_is_ignored() {
        let mut cd = Countdown::new(0);
        cd.arm_at(0, T0);
        assert!(!cd.running());
        assert_eq!(cd.tick_at(T0), Tick::Idle);
    }

    #[test]
    fn reset_stops_and_reloads() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        cd.reset_to(1500);
        assert!(!cd.running());
        assert_eq!(cd.remaining_secs(), 1500);
        assert_eq!(cd.tick_at(T0 + 120_000), Tick::Idle);
    }

    #[test]
    fn resume_continues_from_frozen_value() {
        let mut cd = Countdown::new(0);
        cd.arm_at(60, T0);
        cd.pause_at(T0 + 20_000);
        cd.arm_at(cd.remaining_secs(), T0 + 100_000);
        assert_eq!(
            cd.tick_at(T0 + 100_000),
            Tick::Running {
                remaining_secs: 40,
                changed: false
            }
        );
    }

    proptest! {
        #[test]
        fn arm_then_immediate_tick_yields_full_duration(d in 1u64..=180 * 60) {
            let mut cd = Countdown::new(0);
            cd.arm_at(d, T0);
            prop_assert_eq!(
                cd.tick_at(T0),
                Tick::Running { remaining_secs: d, changed: false }
            );
        }

        #[test]
        fn remaining_never_exceeds_duration(d in 1u64..=180 * 60, dt in 0u64..=200 * 60 * 1000) {
            let mut cd = Countdown::new(0);
            cd.arm_at(d, T0);
            match cd.tick_at(T0 + dt) {
                Tick::Running { remaining_secs, .. } => prop_assert!(remaining_secs <= d),
                Tick::Completed => prop_assert!(dt >= d * 1000),
                Tick::Idle => prop_assert!(false, "armed countdown cannot be idle"),
            }
        }
    }
}
