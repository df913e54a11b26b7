//! Sync stages and the job that drives them.
//!
//! A run is four strictly sequential stages:
//!
//! 1. [`reader`]: list every issue from the tracker.
//! 2. [`locator`]: resolve the target tab to its (name, id) pair.
//! 3. [`reconciler`]: read the tab and merge the fetched issues into its rows.
//! 4. [`writer`]: rewrite the tab in one bulk write, then apply formatting.
//!
//! [`SyncJob`] sequences them. Any stage error short-circuits the run; nothing
//! is retried or rolled back here.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Stages sequence calls between the business logic in
//! the [`pipeline`] crate and the port traits it defines. They contain no merge
//! rules of their own.

pub mod job;
pub mod locator;
pub mod reader;
pub mod reconciler;
pub mod writer;

pub use job::{SyncJob, SyncRequest};
pub use reconciler::ReconciledTable;
