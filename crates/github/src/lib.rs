//! GitHub infrastructure adapter.
//!
//! Implements [`pipeline::IssueSource`] over the GitHub REST API with a
//! personal access token or the Actions-provided `GITHUB_TOKEN`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. Request
//! headers, pagination, wire-format decoding, and pull-request filtering live
//! here; the [`pipeline`] crate only sees [`pipeline::Issue`].
//!
//! ## Pagination
//!
//! The issue listing is requested 100 per page, all states, sorted by last
//! update descending. Subsequent pages follow the `rel="next"` entry of the
//! `Link` response header verbatim until it is absent or a page comes back
//! empty.

mod client;
mod pagination;
mod wire;

pub use client::{GithubIssueClient, DEFAULT_API_BASE, PAGE_SIZE};
pub use pagination::next_page_url;
