//! Wire format of the issue listing endpoint.

use pipeline::{Issue, IssueNumber};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GithubUser {
    pub(crate) login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GithubLabel {
    #[serde(default)]
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GithubIssue {
    pub(crate) number: u64,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) state: Option<String>,
    #[serde(default)]
    pub(crate) labels: Vec<GithubLabel>,
    #[serde(default)]
    pub(crate) assignees: Vec<GithubUser>,
    #[serde(default)]
    pub(crate) user: Option<GithubUser>,
    #[serde(default)]
    pub(crate) created_at: Option<String>,
    #[serde(default)]
    pub(crate) updated_at: Option<String>,
    #[serde(default)]
    pub(crate) html_url: Option<String>,
    /// Set when the entry carries a `pull_request` key, whatever its value.
    #[serde(default, rename = "pull_request", deserialize_with = "key_present")]
    pub(crate) has_pull_request_key: bool,
}

fn key_present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    IgnoredAny::deserialize(deserializer).map(|_| true)
}

impl GithubIssue {
    pub(crate) fn is_pull_request(&self) -> bool {
        self.has_pull_request_key
    }

    pub(crate) fn into_issue(self) -> Issue {
        Issue {
            number: IssueNumber::new(self.number),
            title: self.title.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            labels: self.labels.into_iter().map(|label| label.name).collect(),
            assignees: self.assignees.into_iter().map(|user| user.login).collect(),
            reporter: self.user.map(|user| user.login),
            created_at: self.created_at.unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_default(),
            url: self.html_url.unwrap_or_default(),
        }
    }
}
