//! Turning engine events into terminal output.

use std::io::{self, Write};

use boostly_core::{format_clock, Config, Event};

/// How events are written to stdout.
#[derive(Clone, Copy)]
pub enum Format {
    Text,
    Json,
}

/// Report a command's events on stdout.
pub fn events(events: &[Event], format: Format, config: &Config) {
    if let Err(e) = write_events(&mut io::stdout().lock(), events, format) {
        tracing::warn!(error = %e, "could not write events");
    }
    alert(events, config);
}

/// Report events as text on stderr, for commands whose stdout is a single
/// document (a listing, a status object, an export).
pub fn notices(events: &[Event], config: &Config) {
    if let Err(e) = write_events(&mut io::stderr().lock(), events, Format::Text) {
        tracing::warn!(error = %e, "could not write events");
    }
    alert(events, config);
}

fn write_events(out: &mut impl Write, events: &[Event], format: Format) -> io::Result<()> {
    for event in events.iter().filter(|e| !e.is_tick()) {
        match format {
            Format::Json => writeln!(out, "{}", serde_json::to_string(event)?)?,
            Format::Text => {
                if let Some(line) = describe(event) {
                    writeln!(out, "{line}")?;
                }
            }
        }
    }
    Ok(())
}

fn alert(events: &[Event], config: &Config) {
    for event in events {
        match event {
            Event::PersistenceFailed { message } => {
                eprintln!("warning: changes were not saved ({message}); they may be lost");
            }
            Event::TimerExpired => ring(config),
            _ => {}
        }
    }
}

fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::TaskAdded { text, priority, .. } => format!("Task added: {text} [{priority}]"),
        Event::TaskToggled { done: true, .. } => "Nice! Task completed".to_string(),
        Event::TaskToggled { done: false, .. } => "Task reopened".to_string(),
        Event::TaskEdited { index, .. } => format!("Task {index} updated"),
        Event::TaskDeleted { index, .. } => format!("Task {index} deleted"),
        Event::TasksReordered { from, to } => format!("Moved task {from} to {to}"),
        Event::PointsChanged { old, new } if new >= old => {
            format!("+{} points ({new} total)", new - old)
        }
        Event::PointsChanged { old, new } => format!("-{} points ({new} total)", old - new),
        Event::LevelUp { level } => format!("Level up! You reached level {level}"),
        Event::ProductivityIncremented { .. } => return None,
        Event::TimerStarted { duration_secs } => {
            format!("Focus session started ({})", format_clock(*duration_secs))
        }
        Event::TimerResumed { remaining_secs } => {
            format!("Timer resumed ({} left)", format_clock(*remaining_secs))
        }
        Event::TimerPaused { remaining_secs } => {
            format!("Timer paused ({} left)", format_clock(*remaining_secs))
        }
        Event::TimerReset { remaining_secs } => {
            format!("Timer reset to {}", format_clock(*remaining_secs))
        }
        Event::TimerModeChanged { mode, .. } => format!("Timer mode: {mode}"),
        Event::TimerTick { .. } => return None,
        Event::TimerExpired => "Focus session complete!".to_string(),
        Event::StateReset => "App data reset".to_string(),
        Event::PersistenceFailed { .. } => return None,
    };
    Some(line)
}

/// Redraw the single live countdown line.
pub fn countdown(remaining_secs: u64, progress: f64) {
    const WIDTH: usize = 30;
    let filled = ((progress * WIDTH as f64).round() as usize).min(WIDTH);
    print!(
        "\r{:>6}  [{}{}] {:>3.0}%",
        format_clock(remaining_secs),
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        progress * 100.0
    );
    let _ = std::io::stdout().flush();
}

fn ring(config: &Config) {
    if config.notifications.enabled && config.notifications.bell {
        eprint!("\x07");
    }
}

/// Horizontal bar of `value` cells scaled against `max`.
pub fn bar(value: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let cells = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(cells.min(width))
}
