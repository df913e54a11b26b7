//! Newtype domain identifiers.
//!
//! Every concept with an identity is a distinct newtype wrapping a primitive.
//! This prevents, for example, passing a [`SpreadsheetId`] where a [`TabName`]
//! is expected even though both are strings, or confusing a tab's [`SheetId`]
//! with a [`BandingId`] even though both are integers assigned by the
//! spreadsheet service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// after trimming surrounding whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self(trimmed.to_string()))
                }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for i64-wrapped newtypes (spreadsheet-service-assigned integers).
// Generates: struct (Copy), new(), as_i64(), Display.
// ---------------------------------------------------------------------------
macro_rules! i64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — issue tracker
// ---------------------------------------------------------------------------

/// Identifies an issue within one repository: the number GitHub assigns.
///
/// This is the reconciliation key. It is rendered into the "Issue #" column
/// with [`Display`](std::fmt::Display), so `IssueNumber::new(42)` becomes `"42"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a new issue number from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a GitHub repository in `"owner/name"` format.
///
/// Unlike the other string identifiers, construction validates the shape:
/// exactly one `/` separating two non-empty parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    /// Parses an `"owner/name"` slug, returning `None` if it is malformed.
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, name) = slug.trim().split_once('/')?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Returns the owning user or organisation.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — spreadsheet service
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a spreadsheet document (the long key in its URL).
    SpreadsheetId
}

string_id! {
    /// The human-assigned display name of a tab.
    ///
    /// Used for A1 range addressing in value operations. Humans may rename a
    /// tab at any time; [`SheetId`] is the stable key.
    TabName
}

impl TabName {
    /// Wraps a title exactly as the spreadsheet service reports it.
    ///
    /// Unlike [`TabName::new`] nothing is trimmed: a padded title only
    /// addresses its tab verbatim. Returns `None` for an empty title.
    pub fn from_title(title: &str) -> Option<Self> {
        (!title.is_empty()).then(|| Self(title.to_string()))
    }
}

i64_id! {
    /// The stable numeric identifier of a tab (the `gid` in the sheet URL).
    ///
    /// Structural and formatting operations address tabs only by this value.
    SheetId
}

i64_id! {
    /// Identifies an alternating-colour banded range on a tab.
    BandingId
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single synchronisation run.
///
/// Generated fresh for every invocation and recorded on the root span so all
/// log lines from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncRunId(Uuid);

impl SyncRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

}

impl std::fmt::Display for SyncRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
