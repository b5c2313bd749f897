use std::io::Write as _;
use std::time::Duration;

use clap::Subcommand;
use focustick_core::alert::{Alerter, CompletionAlert};
use focustick_core::storage::Database;
use focustick_core::{DailyStats, Event, PhaseConfig, PomodoroTimer};

use crate::notifier::{self, SystemAlerter};

pub const TIMER_KEY: &str = "timer";
pub const STATS_KEY: &str = "stats";

/// Polling cadence for `watch`. Short enough that the displayed second
/// flips promptly near phase boundaries; correctness never depends on it
/// because every tick recomputes from the absolute end target.
const WATCH_POLL: Duration = Duration::from_millis(250);

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the current phase
    Start,
    /// Pause the countdown
    Pause,
    /// Skip to the other phase (never credits stats)
    Skip,
    /// Reset the current phase to its full duration
    Reset,
    /// Tick once and print the current state as JSON
    Status,
    /// Run in the foreground, ticking every 250ms and alerting on completion
    Watch,
}

pub fn load_timer(db: &Database, config: &PhaseConfig) -> PomodoroTimer {
    db.load_json(TIMER_KEY)
        .unwrap_or_else(|| PomodoroTimer::new(config.clone()))
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = PhaseConfig::load_or_default();
    let mut timer = load_timer(&db, &config);
    let mut stats: DailyStats = db.load_json(STATS_KEY).unwrap_or_default();

    match action {
        TimerAction::Start => {
            settle_elapsed(&db, &mut timer, &mut stats)?;
            // Permission is probed lazily on the first manual start and is
            // fire-and-forget: the countdown arms regardless of outcome.
            notifier::ensure_permission(&db);
            match timer.start() {
                Some(event) => print_event(&event)?,
                None => print_event(&timer.snapshot())?,
            }
        }
        TimerAction::Pause => {
            settle_elapsed(&db, &mut timer, &mut stats)?;
            match timer.pause() {
                Some(event) => print_event(&event)?,
                None => print_event(&timer.snapshot())?,
            }
        }
        // Skip and reset discard the current phase outright, elapsed or
        // not -- they never credit and never alert.
        TimerAction::Skip => {
            let event = timer.skip();
            print_event(&event)?;
        }
        TimerAction::Reset => {
            let event = timer.reset();
            print_event(&event)?;
        }
        TimerAction::Status => {
            settle_elapsed(&db, &mut timer, &mut stats)?;
            print_event(&timer.snapshot())?;
        }
        TimerAction::Watch => {
            watch(&db, &mut timer, &mut stats)?;
        }
    }

    db.save_json(TIMER_KEY, &timer);
    db.save_json(STATS_KEY, &stats);
    Ok(())
}

/// Tick once so a wall-clock-elapsed completion lands (credit, alert,
/// event) before a manual action is applied. With persisted state the
/// scheduler may not have run since the phase ended; pausing or starting
/// against that stale countdown would freeze the completion away.
fn settle_elapsed(
    db: &Database,
    timer: &mut PomodoroTimer,
    stats: &mut DailyStats,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(event) = timer.tick(stats) {
        db.save_json(STATS_KEY, stats);
        alert_completion(db, &event);
        print_event(&event)?;
    }
    Ok(())
}

/// Foreground scheduler: polls the engine until the countdown stops (or
/// indefinitely under auto-chain). State is persisted on every mutation,
/// so an interrupted watch resumes cleanly -- the absolute end target
/// keeps a later `status` tick accurate across the gap.
fn watch(
    db: &Database,
    timer: &mut PomodoroTimer,
    stats: &mut DailyStats,
) -> Result<(), Box<dyn std::error::Error>> {
    let permission = notifier::ensure_permission(db);
    let mut alerter = SystemAlerter::new(permission);

    if let Some(event) = timer.start() {
        print_event(&event)?;
    }
    db.save_json(TIMER_KEY, timer);

    let mut last_shown = u64::MAX;
    while timer.is_running() {
        std::thread::sleep(WATCH_POLL);
        if let Some(event) = timer.tick(stats) {
            db.save_json(STATS_KEY, stats);
            db.save_json(TIMER_KEY, timer);
            if let Some(alert) = CompletionAlert::from_event(&event) {
                alerter.completion(&alert);
            }
            eprintln!();
            print_event(&event)?;
            continue;
        }
        let remaining = timer.remaining_secs();
        if remaining != last_shown {
            last_shown = remaining;
            eprint!(
                "\r{} {:02}:{:02}  ",
                timer.phase().label(),
                remaining / 60,
                remaining % 60
            );
            let _ = std::io::stderr().flush();
        }
    }
    Ok(())
}

fn alert_completion(db: &Database, event: &Event) {
    if let Some(alert) = CompletionAlert::from_event(event) {
        let permission = notifier::ensure_permission(db);
        SystemAlerter::new(permission).completion(&alert);
    }
}
