use boostly_core::Clock;
use boostly_core::reward::LEVEL_THRESHOLD;
use serde_json::json;

use crate::render::{self, Format};
use crate::session::Session;

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn run(format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let (session, pending) = Session::open()?;
    render::notices(&pending, &session.config);
    let state = session.tracker.state();

    match format {
        Format::Json => {
            let stats = json!({
                "points": state.points,
                "level": state.level,
                "experience": state.experience,
                "experience_to_next_level": state.experience_to_next_level(),
                "streak": state.streak,
                "tasks": state.tasks.len(),
                "completed": state.completed_count(),
                "completion_percent": state.completion_percent(),
                "productivity": state.productivity,
            });
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Format::Text => {
            println!("Points  {:>6}", state.points);
            println!("Streak  {:>6}", state.streak);
            println!(
                "Level   {:>6}  [{:<20}] {}/{} xp",
                state.level,
                render::bar(state.experience, LEVEL_THRESHOLD, 20),
                state.experience,
                LEVEL_THRESHOLD
            );
            println!(
                "Tasks   {:>6}  {} done ({}%)",
                state.tasks.len(),
                state.completed_count(),
                state.completion_percent()
            );
            println!();

            let today = session.tracker.clock().weekday_index();
            let max = state.productivity.iter().copied().max().unwrap_or(0);
            for (index, (label, count)) in DAY_LABELS.iter().zip(state.productivity).enumerate() {
                let marker = if index == today { '>' } else { ' ' };
                println!("{marker}{label} {count:>3} {}", render::bar(count, max, 30));
            }
        }
    }

    Ok(())
}
