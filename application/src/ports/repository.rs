//! Agenda persistence port

use crate::workflow::AgendaSnapshot;
use thiserror::Error;

/// Errors from an agenda repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt agenda state: {0}")]
    Corrupt(String),
}

/// Durable storage for the workflow state.
///
/// Synchronous: snapshots are small and writes happen between awaits,
/// never while a provider call is outstanding on the same panel.
pub trait AgendaRepository: Send + Sync {
    /// Load the last saved snapshot, `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<AgendaSnapshot>, RepositoryError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &AgendaSnapshot) -> Result<(), RepositoryError>;
}

/// Memory-only operation: nothing is saved and nothing is loaded.
pub struct NoPersistence;

impl AgendaRepository for NoPersistence {
    fn load(&self) -> Result<Option<AgendaSnapshot>, RepositoryError> {
        Ok(None)
    }

    fn save(&self, _snapshot: &AgendaSnapshot) -> Result<(), RepositoryError> {
        Ok(())
    }
}
