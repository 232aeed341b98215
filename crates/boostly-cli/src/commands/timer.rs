use std::time::Duration;

use boostly_core::{format_clock, Event, TimerMode, TimerState};
use clap::{Subcommand, ValueEnum};
use serde_json::json;

use crate::render::{self, Format};
use crate::session::Session;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a focus session, or resume a paused one
    Start,
    /// Pause the running session
    Pause,
    /// Stop and reload the selected mode's full duration
    Reset,
    /// Print the current timer state
    Status,
    /// Run the countdown in the foreground until it completes (Ctrl-C pauses)
    Watch,
    /// Select the mode used by the next fresh session
    Mode {
        mode: ModeArg,
        /// Session length for custom mode
        #[arg(long, default_value_t = 25)]
        minutes: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Pomodoro,
    Custom,
}

pub fn run(action: TimerAction, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let (mut session, pending) = Session::open()?;
    if let TimerAction::Status = action {
        render::notices(&pending, &session.config);
    } else {
        render::events(&pending, format, &session.config);
    }

    let events = match action {
        TimerAction::Start => session.tracker.start_timer().events,
        TimerAction::Pause => session.tracker.pause_timer().events,
        TimerAction::Reset => session.tracker.reset_timer().events,
        TimerAction::Status => {
            print_status(&session, format)?;
            Vec::new()
        }
        TimerAction::Watch => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(watch(&mut session, format))
        }
        TimerAction::Mode { mode, minutes } => {
            let mode = match mode {
                ModeArg::Pomodoro => TimerMode::Pomodoro,
                ModeArg::Custom => TimerMode::Custom { minutes },
            };
            session.config.timer.set_timer_mode(mode);
            session.config.save()?;
            session.tracker.set_timer_mode(mode).events
        }
    };

    render::events(&events, format, &session.config);
    session.save_timer()?;
    Ok(())
}

/// Tick once per second until the session expires or the user hits Ctrl-C.
async fn watch(session: &mut Session, format: Format) -> Vec<Event> {
    let mut events = session.tracker.start_timer().events;
    render::events(&events, format, &session.config);
    events.clear();

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let outcome = session.tracker.tick();
                session.mark_ticked();
                if let Format::Text = format {
                    let timer = session.tracker.timer();
                    render::countdown(timer.remaining_secs(), timer.progress());
                }
                let expired = outcome.events.contains(&Event::TimerExpired);
                events.extend(outcome.events);
                if expired || !session.tracker.timer().is_running() {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                events.extend(session.tracker.pause_timer().events);
                break;
            }
        }
    }
    if let Format::Text = format {
        println!();
    }
    events
}

fn print_status(session: &Session, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let timer = session.tracker.timer();
    let state = match timer.state() {
        TimerState::Idle => "idle",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
    };
    match format {
        Format::Json => {
            let status = json!({
                "state": state,
                "mode": timer.mode(),
                "remaining_secs": timer.remaining_secs(),
                "total_secs": timer.total_secs(),
                "progress": timer.progress(),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Format::Text => {
            println!(
                "{} / {}  {state}  ({})",
                format_clock(timer.remaining_secs()),
                format_clock(timer.total_secs()),
                timer.mode()
            );
        }
    }
    Ok(())
}
