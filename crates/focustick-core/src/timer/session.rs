//! The Work/Break phase state machine.
//!
//! Wall-clock based, no internal threads: the caller invokes `tick()`
//! periodically (any cadence under a second keeps the display prompt; the
//! countdown recomputes from its absolute target so cadence never affects
//! correctness).
//!
//! ## State Transitions
//!
//! ```text
//! Work --natural completion--> Break   (credits today's stats)
//! Break --natural completion--> Work
//! any --skip--> other phase            (no credit, no auto-chain)
//! any --reset--> same phase, full duration
//! ```
//!
//! On a natural completion the sequence is strictly ordered inside one
//! call: stats credit (Work only), completion event, phase flip, countdown
//! reset, then the auto-chain re-arm. No tick can observe a half-applied
//! transition.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::countdown::{Countdown, Tick};
use crate::clock;
use crate::config::PhaseConfig;
use crate::events::Event;
use crate::stats::DailyStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn other(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

/// Notification title/body for the phase that just ended.
fn completion_messages(ended: Phase) -> (&'static str, &'static str) {
    match ended {
        Phase::Work => ("Work session complete", "Time for a break."),
        Phase::Break => ("Break over", "Back to work."),
    }
}

/// The phase state machine.
///
/// Owns the current phase, the countdown, and a copy of the phase
/// configuration. Serializes to a single kv record so a CLI invocation (or
/// a restarted host) picks up exactly where the last one left off -- the
/// countdown's absolute target makes the gap harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroTimer {
    config: PhaseConfig,
    phase: Phase,
    countdown: Countdown,
}

impl PomodoroTimer {
    /// Fresh timer: Work phase, paused, full work duration loaded.
    pub fn new(config: PhaseConfig) -> Self {
        let countdown = Countdown::new(config.work_secs());
        Self {
            config,
            phase: Phase::Work,
            countdown,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.countdown.running()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    pub fn config(&self) -> &PhaseConfig {
        &self.config
    }

    /// Configured duration of the current phase, in seconds.
    pub fn phase_duration_secs(&self) -> u64 {
        match self.phase {
            Phase::Work => self.config.work_secs(),
            Phase::Break => self.config.break_secs(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            running: self.countdown.running(),
            remaining_secs: self.countdown.remaining_secs(),
            total_secs: self.phase_duration_secs(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the countdown from the current remaining time -- resuming
    /// continues from wherever the display was, not the full duration.
    /// No-op while already running.
    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.countdown.running() {
            return None;
        }
        self.countdown.arm_at(self.countdown.remaining_secs(), now_ms);
        if !self.countdown.running() {
            // Zero remaining (defensive): nothing to count down.
            return None;
        }
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.countdown.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Freeze the countdown. No-op while paused; no phase change.
    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if !self.countdown.running() {
            return None;
        }
        self.countdown.pause_at(now_ms);
        Some(Event::TimerPaused {
            remaining_secs: self.countdown.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Flip to the other phase without credit. Stops the countdown, loads
    /// the new phase's configured duration, never auto-chains.
    pub fn skip(&mut self) -> Event {
        let from = self.phase;
        self.phase = from.other();
        self.countdown.reset_to(self.phase_duration_secs());
        Event::TimerSkipped {
            from,
            to: self.phase,
            at: Utc::now(),
        }
    }

    /// Stop and restore the current phase's full configured duration.
    pub fn reset(&mut self) -> Event {
        self.countdown.reset_to(self.phase_duration_secs());
        Event::TimerReset {
            phase: self.phase,
            at: Utc::now(),
        }
    }

    /// Advance the countdown. Returns `Some(Event::PhaseCompleted)` when
    /// the current phase naturally ends; `today` is the local date key the
    /// credit goes to (the day of completion, not the day the session
    /// started).
    pub fn tick_at(&mut self, now_ms: u64, today: &str, stats: &mut DailyStats) -> Option<Event> {
        match self.countdown.tick_at(now_ms) {
            Tick::Completed => {
                let ended = self.phase;
                if ended == Phase::Work {
                    stats.record_completion(today);
                }
                let (title, body) = completion_messages(ended);
                self.phase = ended.other();
                self.countdown.reset_to(self.phase_duration_secs());
                let auto_chained = self.config.auto_chain;
                if auto_chained {
                    // Re-arm only after the phase/state mutations above, so
                    // the new countdown sees the new phase's duration.
                    self.countdown.arm_at(self.phase_duration_secs(), now_ms);
                }
                Some(Event::PhaseCompleted {
                    phase: ended,
                    title: title.into(),
                    body: body.into(),
                    auto_chained,
                    at: Utc::now(),
                })
            }
            Tick::Idle | Tick::Running { .. } => None,
        }
    }

    /// Apply an edited configuration.
    ///
    /// Non-positive durations are ignored wholesale, keeping the previous
    /// configuration. While paused, the displayed remaining time is
    /// resynchronized to the current phase's new duration; while running,
    /// the new durations take effect at the next reset or natural switch.
    pub fn config_changed(&mut self, new: PhaseConfig) -> Option<Event> {
        if new.work_minutes == 0 || new.break_minutes == 0 {
            return None;
        }
        self.config = new;
        if !self.countdown.running() {
            self.countdown.reset_to(self.phase_duration_secs());
        }
        Some(Event::ConfigUpdated {
            work_minutes: self.config.work_minutes,
            break_minutes: self.config.break_minutes,
            auto_chain: self.config.auto_chain,
            at: Utc::now(),
        })
    }

    // ── Wall-clock conveniences ──────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(clock::now_ms())
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(clock::now_ms())
    }

    pub fn tick(&mut self, stats: &mut DailyStats) -> Option<Event> {
        self.tick_at(clock::now_ms(), &clock::local_date_key(), stats)
    }
}
