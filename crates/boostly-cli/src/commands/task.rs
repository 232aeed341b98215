//! Task management commands for CLI.

use clap::Subcommand;
use boostly_core::{Priority, Task};

use super::confirm;
use crate::render::{self, Format};
use crate::session::Session;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the top of the list
    Add {
        /// Task text
        text: String,
        /// Priority: low, medium or high
        #[arg(long, short, default_value = "medium")]
        priority: Priority,
    },
    /// List tasks, top first
    List,
    /// Toggle a task between done and not done
    Done {
        /// Task index as shown by `task list`
        index: usize,
    },
    /// Replace a task's text
    Edit {
        index: usize,
        /// New text (blank keeps the old text)
        text: String,
    },
    /// Change a task's priority
    Priority {
        index: usize,
        priority: Priority,
    },
    /// Delete a task
    Delete {
        index: usize,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Move a task to another position
    Move {
        from: usize,
        to: usize,
    },
}

pub fn run(action: TaskAction, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let (mut session, pending) = Session::open()?;
    if let TaskAction::List = action {
        render::notices(&pending, &session.config);
    } else {
        render::events(&pending, format, &session.config);
    }
    let tracker = &mut session.tracker;

    let events = match action {
        TaskAction::Add { text, priority } => tracker.add_task(&text, priority)?.events,
        TaskAction::List => {
            print_list(tracker.state().tasks.as_slice(), format)?;
            Vec::new()
        }
        TaskAction::Done { index } => tracker.toggle_done(index)?.events,
        TaskAction::Edit { index, text } => {
            let outcome = tracker.edit_text(index, &text)?;
            if !outcome.value {
                eprintln!("blank text, task {index} left unchanged");
            }
            outcome.events
        }
        TaskAction::Priority { index, priority } => tracker.set_priority(index, priority)?.events,
        TaskAction::Delete { index, yes } => {
            // Out-of-range indices fall through to the tracker's not-found error.
            if let Some(task) = tracker.state().tasks.get(index) {
                if !yes && !confirm(&format!("Delete \"{}\"?", task.text))? {
                    println!("Kept task {index}");
                    return Ok(());
                }
            }
            tracker.delete_task(index)?.events
        }
        TaskAction::Move { from, to } => tracker.reorder(from, to)?.events,
    };

    render::events(&events, format, &session.config);
    Ok(())
}

fn print_list(tasks: &[Task], format: Format) -> Result<(), Box<dyn std::error::Error>> {
    if let Format::Json = format {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }
    if tasks.is_empty() {
        println!("No tasks yet. Add one with `boostly task add <text>`.");
        return Ok(());
    }
    for (index, task) in tasks.iter().enumerate() {
        let mark = if task.done { "x" } else { " " };
        println!("{index:>3}. [{mark}] {}  [{}]", task.text, task.priority);
    }
    Ok(())
}
