//! In-memory gateway, for tests and throwaway sessions.

use super::PersistenceGateway;
use crate::error::PersistenceError;
use crate::state::AppState;

#[derive(Debug, Default)]
pub struct MemoryGateway {
    saved: Option<AppState>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously saved snapshot.
    pub fn with_state(state: AppState) -> Self {
        Self {
            saved: Some(state),
            ..Self::default()
        }
    }

    /// Make every subsequent `save` fail.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn saved(&self) -> Option<&AppState> {
        self.saved.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> Result<Option<AppState>, PersistenceError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, state: &AppState) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::QueryFailed("simulated write failure".into()));
        }
        self.saved = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}
