//! Google Sheets infrastructure adapter.
//!
//! Implements [`pipeline::SpreadsheetStore`] over the Sheets v4 REST API, and
//! the service-account OAuth exchange that authorises it.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** A1 range quoting, URL encoding, request/response wire
//! formats, and the translation of [`pipeline::FormatOperation`] into
//! `batchUpdate` requests all live here. The [`pipeline`] crate never sees
//! them.
//!
//! ## Authorisation
//!
//! [`ServiceAccountAuth`] signs an RS256 JWT with the service account's key and
//! exchanges it at the key's `token_uri` for a bearer token. [`SheetsClient`]
//! performs the exchange on its first request and keeps the token for the rest
//! of the run.

mod auth;
mod client;
mod range;
mod requests;
mod wire;

pub use auth::{AccessToken, ServiceAccountAuth, ServiceAccountKey, DEFAULT_TOKEN_URI, SPREADSHEETS_SCOPE};
pub use client::{SheetsClient, DEFAULT_API_BASE, READ_RANGE};
pub use range::a1_range;
pub use requests::batch_update_body;
