use clap::Subcommand;
use focustick_core::storage::Database;
use focustick_core::{clock, DailyStats};

use super::timer::STATS_KEY;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Completed work sessions today
    Today,
    /// Completed work sessions on a given day (YYYY-MM-DD)
    Day { date: String },
    /// Full per-day history
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let stats: DailyStats = db.load_json(STATS_KEY).unwrap_or_default();

    match action {
        StatsAction::Today => {
            let today = clock::local_date_key();
            print_day(&today, stats.query(&today))?;
        }
        StatsAction::Day { date } => {
            print_day(&date, stats.query(&date))?;
        }
        StatsAction::All => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "days": stats,
                    "total": stats.total(),
                }))?
            );
        }
    }
    Ok(())
}

fn print_day(date: &str, completed: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "date": date,
            "completed_pomodoros": completed,
        }))?
    );
    Ok(())
}
