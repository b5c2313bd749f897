use clap::Subcommand;
use focustick_core::storage::Database;
use focustick_core::PhaseConfig;

use super::timer::TIMER_KEY;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration
    Show,
    /// Get a value by key (work_minutes, break_minutes, auto_chain)
    Get { key: String },
    /// Set a value by key (work 1-180 minutes, break 1-60 minutes)
    Set { key: String, value: String },
    /// Restore defaults (work=25, break=5, auto_chain=false)
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = PhaseConfig::load_or_default();

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown configuration key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            apply_to_timer(&config)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            config = PhaseConfig::default();
            config.save()?;
            apply_to_timer(&config)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

/// Notify the persisted engine of the edited configuration: paused timers
/// resynchronize their displayed remaining time immediately, running ones
/// pick the new durations up at the next reset or natural phase switch.
fn apply_to_timer(config: &PhaseConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut timer = super::timer::load_timer(&db, config);
    timer.config_changed(config.clone());
    db.save_json(TIMER_KEY, &timer);
    Ok(())
}
