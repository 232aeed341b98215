//! Task store.
//!
//! An ordered list of tasks where index 0 is the top of the list. New tasks
//! are prepended, and the user may move them around freely; the order is
//! the display order. Every operation validates its inputs before touching
//! the list, so a failed call leaves it unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result, ValidationError};

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("expected low, medium or high, got '{other}'"),
            }),
        }
    }
}

/// A single to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub priority: Priority,
}

/// Ordered task collection, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// Prepend a new task and return it.
    ///
    /// `now_ms` seeds the id; it is bumped past the largest existing id so
    /// two tasks created within the same millisecond never collide. Once
    /// `u64::MAX` is taken the lowest free id is used instead.
    pub fn add(&mut self, text: &str, priority: Priority, now_ms: u64) -> Result<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        let id = match self.max_id() {
            Some(max) if now_ms <= max => self.free_id_from(max.wrapping_add(1)),
            _ => now_ms,
        };
        self.tasks.insert(
            0,
            Task {
                id,
                text: text.to_string(),
                done: false,
                priority,
            },
        );
        Ok(&self.tasks[0])
    }

    /// Flip the completion flag. Returns the task after the flip.
    pub fn toggle(&mut self, index: usize) -> Result<&Task> {
        let task = self.get_mut(index)?;
        task.done = !task.done;
        Ok(&*task)
    }

    /// Replace the text. Blank input leaves the task as it was and
    /// returns `false`.
    pub fn edit_text(&mut self, index: usize, text: &str) -> Result<bool> {
        let task = self.get_mut(index)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        task.text = text.to_string();
        Ok(true)
    }

    /// Change the priority. Returns `false` when it was already set.
    pub fn set_priority(&mut self, index: usize, priority: Priority) -> Result<bool> {
        let task = self.get_mut(index)?;
        if task.priority == priority {
            return Ok(false);
        }
        task.priority = priority;
        Ok(true)
    }

    pub fn remove(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Move the task at `from` so it ends up at `to`.
    ///
    /// Returns `false` for the `from == to` no-op.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(false);
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        Ok(true)
    }

    /// Whether every id in the list is distinct.
    pub fn ids_unique(&self) -> bool {
        let mut ids: Vec<u64> = self.tasks.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.windows(2).all(|w| w[0] != w[1])
    }

    /// Give every task after the first with a repeated id a fresh one.
    pub(crate) fn dedup_ids(&mut self) {
        let mut seen = HashSet::new();
        let mut next = self.max_id().unwrap_or(0).wrapping_add(1);
        for i in 0..self.tasks.len() {
            if seen.insert(self.tasks[i].id) {
                continue;
            }
            next = self.free_id_from(next);
            self.tasks[i].id = next;
            seen.insert(next);
            next = next.wrapping_add(1);
        }
    }

    fn max_id(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.id).max()
    }

    /// First id at or after `start`, wrapping past `u64::MAX`, that no task
    /// uses.
    fn free_id_from(&self, start: u64) -> u64 {
        let mut id = start;
        while self.tasks.iter().any(|t| t.id == id) {
            id = id.wrapping_add(1);
        }
        id
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(CoreError::task_not_found(index, self.tasks.len()))
        }
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or_else(|| CoreError::task_not_found(index, len))
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
