//! Workflow state: the single owner of the agenda's panels and speakers.

mod error;
mod snapshot;
mod store;

pub use error::StoreError;
pub use snapshot::AgendaSnapshot;
pub use store::WorkflowStore;
