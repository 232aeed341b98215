//! The persisted aggregate.

use serde::{Deserialize, Serialize};

use crate::reward::LEVEL_THRESHOLD;
use crate::task::TaskList;

/// Number of slots in the productivity window (Monday .. Sunday).
pub const WEEK_DAYS: usize = 7;

/// Everything the tracker persists.
///
/// Field names match the snapshot format written by earlier versions, so an
/// exported snapshot can be imported as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppState {
    #[serde(default)]
    pub points: u64,
    /// Reserved. Persisted for compatibility; nothing updates it.
    #[serde(default)]
    pub streak: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(rename = "exp", default)]
    pub experience: u32,
    #[serde(default)]
    pub tasks: TaskList,
    #[serde(default)]
    pub productivity: [u32; WEEK_DAYS],
}

fn default_level() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            points: 0,
            streak: 0,
            level: default_level(),
            experience: 0,
            tasks: TaskList::new(),
            productivity: [0; WEEK_DAYS],
        }
    }
}

impl AppState {
    pub fn completed_count(&self) -> usize {
        self.tasks.completed_count()
    }

    /// Share of tasks marked done, rounded to a whole percent.
    ///
    /// An empty list reports 0.
    pub fn completion_percent(&self) -> u32 {
        let total = self.tasks.len().max(1) as f64;
        ((self.completed_count() as f64 / total) * 100.0).round() as u32
    }

    pub fn experience_to_next_level(&self) -> u32 {
        LEVEL_THRESHOLD.saturating_sub(self.experience)
    }

    /// Repair a snapshot that came from outside the engine.
    ///
    /// Level is raised to at least 1, excess experience is rolled into
    /// levels and duplicate task ids are reassigned.
    pub fn normalize(&mut self) {
        if self.level == 0 {
            self.level = 1;
        }
        self.level = self.level.saturating_add(self.experience / LEVEL_THRESHOLD);
        self.experience %= LEVEL_THRESHOLD;

        if !self.tasks.ids_unique() {
            self.tasks.dedup_ids();
        }
    }
}
