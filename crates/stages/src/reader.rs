//! Source Reader stage.

use pipeline::{Issue, IssueSource, RepositoryId, SyncError};
use tracing::{info, instrument};

/// Lists every non-pull-request issue of `repository`, most recently updated
/// first.
#[instrument(name = "read_issues", skip_all, fields(repository = %repository))]
pub async fn read_issues(
    source: &dyn IssueSource,
    repository: &RepositoryId,
) -> Result<Vec<Issue>, SyncError> {
    let issues = source.list_issues(repository).await?;
    info!(count = issues.len(), "Fetched issues");
    Ok(issues)
}
