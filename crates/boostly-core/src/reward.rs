//! Points, experience and levels.
//!
//! Pure functions over [`AppState`]: each returns the events it caused and
//! leaves persistence to the caller.

use crate::events::Event;
use crate::state::{AppState, WEEK_DAYS};

/// Experience needed for one level.
pub const LEVEL_THRESHOLD: u32 = 100;
/// Points for checking off a task.
pub const TASK_COMPLETION_POINTS: u32 = 10;
/// Points for running a focus session down to zero.
pub const FOCUS_SESSION_POINTS: u32 = 50;

/// Add `n` to both points and experience, rolling experience into levels.
pub fn award_points(state: &mut AppState, n: u32) -> Vec<Event> {
    let old = state.points;
    state.points = state.points.saturating_add(u64::from(n));
    let mut events = vec![Event::PointsChanged {
        old,
        new: state.points,
    }];

    state.experience = state.experience.saturating_add(n);
    while state.experience >= LEVEL_THRESHOLD {
        state.experience -= LEVEL_THRESHOLD;
        state.level = state.level.saturating_add(1);
        tracing::info!(level = state.level, "level up");
        events.push(Event::LevelUp { level: state.level });
    }
    events
}

/// A task was checked off on the given weekday.
pub fn on_task_completed(state: &mut AppState, weekday_index: usize) -> Vec<Event> {
    let mut events = award_points(state, TASK_COMPLETION_POINTS);
    let slot = weekday_index % WEEK_DAYS;
    state.productivity[slot] = state.productivity[slot].saturating_add(1);
    events.push(Event::ProductivityIncremented {
        weekday_index: slot,
        count: state.productivity[slot],
    });
    events
}

/// A task was un-checked.
///
/// Points drop by the completion reward, floored at zero. Experience and
/// the productivity window keep what was earned.
pub fn on_task_uncompleted(state: &mut AppState) -> Vec<Event> {
    let old = state.points;
    state.points = old.saturating_sub(u64::from(TASK_COMPLETION_POINTS));
    if state.points == old {
        return Vec::new();
    }
    vec![Event::PointsChanged {
        old,
        new: state.points,
    }]
}

pub fn on_timer_expired(state: &mut AppState) -> Vec<Event> {
    award_points(state, FOCUS_SESSION_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_ups(events: &[Event]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, Event::LevelUp { .. }))
            .count()
    }

    #[test]
    fn crossing_threshold_levels_up_once() {
        let mut state = AppState {
            points: 95,
            experience: 95,
            ..AppState::default()
        };
        let events = award_points(&mut state, 10);
        assert_eq!(state.points, 105);
        assert_eq!(state.experience, 5);
        assert_eq!(state.level, 2);
        assert_eq!(level_ups(&events), 1);
        assert_eq!(events[0], Event::PointsChanged { old: 95, new: 105 });
    }

    #[test]
    fn large_award_levels_up_repeatedly() {
        let mut state = AppState {
            experience: 40,
            ..AppState::default()
        };
        let events = award_points(&mut state, 270);
        assert_eq!(state.level, 4);
        assert_eq!(state.experience, 10);
        assert_eq!(level_ups(&events), 3);
        assert_eq!(events.last(), Some(&Event::LevelUp { level: 4 }));
    }

    #[test]
    fn exact_threshold_rolls_to_zero() {
        let mut state = AppState {
            experience: 50,
            ..AppState::default()
        };
        award_points(&mut state, 50);
        assert_eq!(state.experience, 0);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn level_stops_at_max() {
        let mut state = AppState {
            level: u32::MAX,
            experience: 90,
            ..AppState::default()
        };
        let events = award_points(&mut state, 20);
        assert_eq!(state.level, u32::MAX);
        assert_eq!(state.experience, 10);
        assert_eq!(events.last(), Some(&Event::LevelUp { level: u32::MAX }));
    }

    #[test]
    fn completion_counts_toward_today() {
        let mut state = AppState::default();
        let events = on_task_completed(&mut state, 6);
        assert_eq!(state.points, 10);
        assert_eq!(state.productivity, [0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(
            events.last(),
            Some(&Event::ProductivityIncremented {
                weekday_index: 6,
                count: 1
            })
        );
    }

    #[test]
    fn uncompletion_clamps_at_zero() {
        let mut state = AppState {
            points: 7,
            experience: 7,
            ..AppState::default()
        };
        let events = on_task_uncompleted(&mut state);
        assert_eq!(state.points, 0);
        assert_eq!(state.experience, 7);
        assert_eq!(events, vec![Event::PointsChanged { old: 7, new: 0 }]);

        assert!(on_task_uncompleted(&mut state).is_empty());
    }

    #[test]
    fn uncompletion_keeps_productivity() {
        let mut state = AppState::default();
        on_task_completed(&mut state, 2);
        on_task_uncompleted(&mut state);
        assert_eq!(state.points, 0);
        assert_eq!(state.productivity[2], 1);
    }

    #[test]
    fn timer_expiry_awards_fifty() {
        let mut state = AppState::default();
        on_timer_expired(&mut state);
        assert_eq!(state.points, 50);
        assert_eq!(state.experience, 50);
        assert_eq!(state.productivity, [0; 7]);
    }
}
