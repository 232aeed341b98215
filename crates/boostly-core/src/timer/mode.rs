use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a standard focus session in minutes.
pub const POMODORO_MINUTES: u32 = 25;

/// How long a fresh countdown runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimerMode {
    /// Fixed 25 minutes.
    Pomodoro,
    /// User-chosen length. Zero minutes falls back to 25.
    Custom { minutes: u32 },
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Pomodoro
    }
}

impl TimerMode {
    pub fn minutes(&self) -> u32 {
        match *self {
            TimerMode::Pomodoro => POMODORO_MINUTES,
            TimerMode::Custom { minutes: 0 } => POMODORO_MINUTES,
            TimerMode::Custom { minutes } => minutes,
        }
    }

    pub fn duration_secs(&self) -> u64 {
        u64::from(self.minutes()).saturating_mul(60)
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::Pomodoro => f.write_str("pomodoro"),
            TimerMode::Custom { .. } => write!(f, "custom ({} min)", self.minutes()),
        }
    }
}

/// Render seconds as `m:ss`.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_custom_minutes_fall_back() {
        assert_eq!(TimerMode::Custom { minutes: 0 }.duration_secs(), 1500);
        assert_eq!(TimerMode::Custom { minutes: 1 }.duration_secs(), 60);
        assert_eq!(TimerMode::Pomodoro.duration_secs(), 1500);
    }

    #[test]
    fn clock_format_pads_seconds() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(0), "0:00");
    }
}
