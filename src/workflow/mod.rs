//! Data models of GitHub Actions workflows.

use serde::Deserialize;

pub mod artifact;

/// Represents a GitHub Actions workflow run from GitHub REST API or a webhook payload.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct WorkflowRun {
    /// The id of the workflow run.
    pub id: u64,
    /// The commit the workflow run built.
    pub head_sha: String,
    /// The branch the workflow run built.
    #[serde(default)]
    pub head_branch: Option<String>,
    /// The id of the repository the workflow ran in.
    #[serde(default)]
    pub repository_id: Option<u64>,
    /// The id of the repository holding the head commit, e.g. a fork.
    #[serde(default)]
    pub head_repository_id: Option<u64>,
}

/// Represents the payload of a `workflow_run` event.
#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowRunEvent {
    /// The workflow run that triggered the event.
    pub workflow_run: WorkflowRun,
}
