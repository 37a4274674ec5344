//! Collection Link Synchronization
//!
//! Diffs the edited link list against the last-fetched server list and applies
//! the resulting creates, updates and deletes concurrently.

mod plan;
mod status;
mod save;

pub use plan::{partition_by_identity, reconcile, SyncPlan};
pub use status::{SaveStatus, StatusHandle};
pub use save::{
    LinkSynchronizer, NoopListener, Operation, OperationOutcome, SaveError, SaveListener,
    SaveReport, DEFAULT_STATUS_RESET,
};
