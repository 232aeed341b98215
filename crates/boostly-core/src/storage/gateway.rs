use crate::error::PersistenceError;
use crate::state::AppState;

/// Load/save contract for the persisted aggregate.
///
/// The engine calls `save` after every mutation. A failed save is reported
/// but never rolls back the in-memory state.
pub trait PersistenceGateway {
    /// Previously saved state, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<AppState>, PersistenceError>;

    fn save(&mut self, state: &AppState) -> Result<(), PersistenceError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Box<G> {
    fn load(&self) -> Result<Option<AppState>, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, state: &AppState) -> Result<(), PersistenceError> {
        (**self).save(state)
    }
}
