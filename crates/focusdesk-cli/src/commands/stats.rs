use clap::Subcommand;
use focusdesk_core::MonthGrouping;
use serde::Serialize;

use super::open_store;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Task completion and focus totals
    Summary,
    /// Focus minutes for the last seven days
    Week,
    /// Focus minutes per month
    Month {
        /// Merge the same month across years
        #[arg(long)]
        by_name: bool,
    },
    /// Focus per day for the last N days
    Daily {
        /// Number of days (default: stats.daily_series_days)
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Serialize)]
struct Summary {
    completed: usize,
    remaining: usize,
    total_focus_seconds: u64,
    today_focus_minutes: u64,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;

    match action {
        StatsAction::Summary => {
            let tasks = store.completion_summary();
            let summary = Summary {
                completed: tasks.completed,
                remaining: tasks.remaining,
                total_focus_seconds: store.total_seconds(),
                today_focus_minutes: store.today_focus_minutes(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Week => {
            println!("{}", serde_json::to_string_pretty(&store.weekly_aggregate())?);
        }
        StatsAction::Month { by_name } => {
            let months = if by_name {
                store.monthly_aggregate_by(MonthGrouping::MonthName)
            } else {
                store.monthly_aggregate()
            };
            println!("{}", serde_json::to_string_pretty(&months)?);
        }
        StatsAction::Daily { days } => {
            let days = days.unwrap_or_else(|| {
                focusdesk_core::Config::load_or_default().stats.daily_series_days
            });
            println!("{}", serde_json::to_string_pretty(&store.daily_series(days))?);
        }
    }
    Ok(())
}
