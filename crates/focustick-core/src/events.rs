use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the engine produces an Event.
///
/// The presentation layer prints them; alerting collaborators attach to
/// `PhaseCompleted`, which fires exactly once per natural completion and
/// never on skip or reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: Phase,
        to: Phase,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero. `phase` is the phase that ended; the
    /// title/body pair is ready for notification/toast collaborators.
    PhaseCompleted {
        phase: Phase,
        title: String,
        body: String,
        auto_chained: bool,
        at: DateTime<Utc>,
    },
    ConfigUpdated {
        work_minutes: u64,
        break_minutes: u64,
        auto_chain: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        running: bool,
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
}
