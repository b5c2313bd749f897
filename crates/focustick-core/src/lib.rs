//! # Focustick Core Library
//!
//! Core business logic for the Focustick focus timer. The engine is a
//! library consumed by a presentation layer: it owns no threads and no
//! timers, and the caller drives it by invoking `tick()` periodically.
//!
//! ## Architecture
//!
//! - **Countdown engine**: drift-corrected countdown keyed on an absolute
//!   wall-clock end target, so delayed or coalesced ticks cannot
//!   accumulate error
//! - **Phase machine**: the Work/Break cycle -- natural completion,
//!   manual skip/reset, optional auto-chain into the next phase
//! - **Daily stats**: per-calendar-day count of completed work sessions
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`PomodoroTimer`]: the phase state machine
//! - [`Countdown`]: the drift-corrected countdown
//! - [`DailyStats`]: completed-session aggregation
//! - [`PhaseConfig`]: user-configurable durations
//! - [`Database`]: best-effort key-value persistence

pub mod alert;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod stats;
pub mod storage;
pub mod timer;

pub use alert::{Alerter, CompletionAlert, PermissionState};
pub use config::PhaseConfig;
pub use error::{ConfigError, StorageError};
pub use events::Event;
pub use stats::DailyStats;
pub use storage::Database;
pub use timer::{Countdown, Phase, PomodoroTimer, Tick};
