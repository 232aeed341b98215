mod engine;
mod mode;

pub use engine::{TimerEngine, TimerState};
pub use mode::{format_clock, TimerMode, POMODORO_MINUTES};
