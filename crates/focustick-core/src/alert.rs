//! The alerting collaborator seam.
//!
//! The engine only emits a `PhaseCompleted` event; deciding how to alert
//! (sound, system notification, toast) belongs to implementations of
//! [`Alerter`]. The contract is fire-and-forget: implementations absorb
//! their own failures and must never block or fail timer progression.

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::timer::Phase;

/// Platform notification permission, persisted across runs.
///
/// Requested once, lazily, on the user's first manual start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Not yet requested.
    Default,
    Granted,
    Denied,
    Unsupported,
}

impl PermissionState {
    pub fn allows_notification(self) -> bool {
        self == PermissionState::Granted
    }
}

/// What alerting collaborators receive on each natural completion.
#[derive(Debug, Clone)]
pub struct CompletionAlert {
    /// The phase that just ended.
    pub phase: Phase,
    pub title: String,
    pub body: String,
}

impl CompletionAlert {
    /// Extract the alert from an event stream entry; `None` for anything
    /// other than a natural completion (skip and reset never alert).
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::PhaseCompleted {
                phase, title, body, ..
            } => Some(Self {
                phase: *phase,
                title: title.clone(),
                body: body.clone(),
            }),
            _ => None,
        }
    }
}

pub trait Alerter {
    fn completion(&mut self, alert: &CompletionAlert);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn only_completions_produce_alerts() {
        let completed = Event::PhaseCompleted {
            phase: Phase::Work,
            title: "Work session complete".into(),
            body: "Time for a break.".into(),
            auto_chained: false,
            at: Utc::now(),
        };
        let alert = CompletionAlert::from_event(&completed).unwrap();
        assert_eq!(alert.phase, Phase::Work);
        assert_eq!(alert.title, "Work session complete");

        let reset = Event::TimerReset {
            phase: Phase::Work,
            at: Utc::now(),
        };
        assert!(CompletionAlert::from_event(&reset).is_none());
    }

    #[test]
    fn permission_gating() {
        assert!(PermissionState::Granted.allows_notification());
        assert!(!PermissionState::Default.allows_notification());
        assert!(!PermissionState::Denied.allows_notification());
        assert!(!PermissionState::Unsupported.allows_notification());
    }

    #[test]
    fn permission_roundtrips_as_json() {
        let json = serde_json::to_string(&PermissionState::Granted).unwrap();
        assert_eq!(json, r#""granted""#);
        let back: PermissionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PermissionState::Granted);
    }
}
