//! Desktop alerting: notification, audio cue, and a stderr toast line.
//!
//! Everything here is best-effort. A missing notification daemon, a dumb
//! terminal, or a denied permission degrades silently -- the engine's
//! progression never depends on any of it.

use focustick_core::alert::{Alerter, CompletionAlert, PermissionState};
use focustick_core::storage::Database;
use notify_rust::Notification;

pub const PERMISSION_KEY: &str = "notify_permission";

/// Resolve the notification permission, probing and persisting it on the
/// first call. Fire-and-forget from the caller's perspective.
pub fn ensure_permission(db: &Database) -> PermissionState {
    if let Some(state) = db.load_json::<PermissionState>(PERMISSION_KEY) {
        if state != PermissionState::Default {
            return state;
        }
    }
    let state = request_permission();
    db.save_json(PERMISSION_KEY, &state);
    state
}

/// notify-rust has no permission handshake of its own, so the probe
/// doubles as the request: one visible notification on platforms that
/// accept it. A backend that errors out (absent daemon, refused display)
/// records as denied; platforms without a backend at all record as
/// unsupported.
fn request_permission() -> PermissionState {
    if !cfg!(any(
        target_os = "linux",
        target_os = "macos",
        target_os = "windows"
    )) {
        return PermissionState::Unsupported;
    }
    match Notification::new()
        .summary("Focustick")
        .body("Notifications enabled.")
        .appname("focustick")
        .show()
    {
        Ok(_) => PermissionState::Granted,
        Err(_) => PermissionState::Denied,
    }
}

/// Terminal-host alerter: bell, desktop notification, stderr toast.
pub struct SystemAlerter {
    permission: PermissionState,
}

impl SystemAlerter {
    pub fn new(permission: PermissionState) -> Self {
        Self { permission }
    }
}

impl Alerter for SystemAlerter {
    fn completion(&mut self, alert: &CompletionAlert) {
        // Audio cue: terminal bell.
        eprint!("\x07");

        if self.permission.allows_notification() {
            let _ = Notification::new()
                .summary(&alert.title)
                .body(&alert.body)
                .appname("focustick")
                .icon("alarm-clock")
                .show();
        }

        // Toast.
        eprintln!("{} -- {}", alert.title, alert.body);
    }
}
