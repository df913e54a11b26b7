//! Core domain for the issue-to-sheet sync.
//!
//! This crate contains every domain concept, newtype identifier, the merge
//! rules that decide what a synced tab looks like, and the port traits the
//! infrastructure crates implement.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a run reads and writes; `github` and `sheets` define *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `SheetId`, `TabName`, etc.) |
//! | [`types`] | Value types (`Issue`, `TabMetadata`, `TabRef`, `SyncReport`) |
//! | [`errors`] | [`SyncError`] and [`ApiService`] |
//! | [`header`] | Column vocabulary and header derivation |
//! | [`reconcile`] | Merging fetched issues into existing rows |
//! | [`locate`] | Resolving the target tab by id or name |
//! | [`formatting`] | The presentation plan applied after each rewrite |
//! | [`ports`] | [`IssueSource`] and [`SpreadsheetStore`] |

pub mod errors;
pub mod formatting;
pub mod header;
pub mod identifiers;
pub mod locate;
pub mod ports;
pub mod reconcile;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ApiService, SyncError};
pub use formatting::{FormatOperation, GridRange, Rgb};
pub use header::Header;
pub use identifiers::{
    BandingId, IssueNumber, RepositoryId, SheetId, SpreadsheetId, SyncRunId, TabName,
};
pub use locate::{resolve_tab, ResolvedTab};
pub use ports::{IssueSource, SpreadsheetStore};
pub use reconcile::{reconcile, Reconciliation};
pub use types::{Issue, Row, SyncReport, TabMetadata, TabRef};
