//! Cache/remote reconciliation: the pagination cursor and the coordinator.

mod coordinator;
mod cursor;

pub use coordinator::{filter_by_name, Snapshot, SyncCoordinator, SyncEvent};
pub use cursor::PageCursor;
