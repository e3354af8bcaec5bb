use clap::Subcommand;
use focusdesk_core::timer::now_ms;
use focusdesk_core::{Config, Cue, Event, PomodoroEngine, TickDriver};
use std::io::Write;
use std::time::Duration;

use super::open_store;

/// How often the foreground loop checks the wall clock.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground, printing events as JSON lines
    Run {
        /// Work length in minutes (1-180, default: timer.work_minutes)
        #[arg(long)]
        work: Option<i64>,
        /// Break length in minutes (1-60, default: timer.break_minutes)
        #[arg(long = "break")]
        break_minutes: Option<i64>,
        /// Stop after this many phase changes
        #[arg(long)]
        phases: Option<u32>,
    },
    /// Print the configured timer state as JSON
    Status,
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

/// One bell for a break, two for the return to work.
fn ring(cue: Cue) {
    let bells = match cue {
        Cue::BreakStart => "\x07",
        Cue::WorkStart => "\x07\x07",
    };
    let mut stderr = std::io::stderr();
    let _ = stderr.write_all(bells.as_bytes());
    let _ = stderr.flush();
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = PomodoroEngine::from_config(&config.timer);

    match action {
        TimerAction::Run {
            work,
            break_minutes,
            phases,
        } => {
            if let Some(minutes) = work {
                engine.configure_work(minutes);
            }
            if let Some(minutes) = break_minutes {
                engine.configure_break(minutes);
            }

            let mut store = open_store()?;
            let mut driver = TickDriver::new();
            if let Some(event) = engine.start() {
                print_event(&event)?;
            }
            driver.arm(now_ms());

            let limit = phases.map_or(usize::MAX, |n| n as usize);
            let mut changes = 0usize;
            while changes < limit {
                std::thread::sleep(POLL_INTERVAL);
                let events =
                    driver.drive_until(&mut engine, &mut store, now_ms(), limit - changes);
                for event in events {
                    if let Event::PhaseChanged { cue, .. } = &event {
                        ring(*cue);
                        changes += 1;
                    }
                    print_event(&event)?;
                }
            }

            driver.disarm();
            if let Some(event) = engine.pause() {
                print_event(&event)?;
            }
            eprintln!(
                "Focused {} minutes today ({} s total)",
                store.today_focus_minutes(),
                store.total_seconds()
            );
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }
    Ok(())
}
