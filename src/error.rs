//! Errors produced while notifying a pull request.

use thiserror::Error;

/// An error that stops a notification.
///
/// [`NotifyError::NoMatchingPullRequest`] and [`NotifyError::NoArtifacts`] are expected outcomes of
/// a workflow run and are only reported, see [`NotifyError::is_reported`]. Everything else is a
/// failure of the collaborators and is propagated as [`NotifyError::Api`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NotifyError {
    /// No open pull request has the head commit of the workflow run.
    #[error("no matching pull request found for {head_sha}")]
    NoMatchingPullRequest {
        /// The head commit that was looked up.
        head_sha: String,
    },
    /// The workflow run produced no artifacts.
    #[error("no artifacts found for workflow run {run_id}")]
    NoArtifacts {
        /// The id of the workflow run.
        run_id: u64,
    },
    /// A collaborator failed.
    #[error(transparent)]
    Api(#[from] anyhow::Error),
}

impl NotifyError {
    /// Whether the error only needs to be reported, without failing the job.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            Self::NoMatchingPullRequest { .. } | Self::NoArtifacts { .. }
        )
    }
}

/// A [`Result`] whose error is a [`NotifyError`].
pub type NotifyResult<T> = Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_expected_outcomes_are_reported() {
        assert!(
            NotifyError::NoMatchingPullRequest {
                head_sha: String::from("abc")
            }
            .is_reported()
        );
        assert!(NotifyError::NoArtifacts { run_id: 1 }.is_reported());
        assert!(!NotifyError::from(anyhow::anyhow!("boom")).is_reported());
    }

    #[test]
    fn api_errors_are_transparent() {
        let err = NotifyError::from(anyhow::anyhow!("failed to request comments"));
        assert_eq!(err.to_string(), "failed to request comments");
    }
}
