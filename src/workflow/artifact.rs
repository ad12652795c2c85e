//! Artifacts from GitHub REST API and related functions.

use std::fmt::Display;

use async_trait::async_trait;
use futures::TryStreamExt as _;
use serde::Deserialize;
use tracing::debug;

use crate::{
    github::{GitHub, paginate::paginate},
    workflow::WorkflowRun,
};

/// Represents artifacts from GitHub REST API.
#[derive(Debug, Deserialize, Clone)]
pub struct Artifacts {
    /// The number of artifacts across all pages.
    pub total_count: u64,
    /// The artifacts of this page.
    pub artifacts: Vec<Artifact>,
}

/// Represents an artifact from GitHub REST API.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    /// The id of the artifact.
    pub id: u64,
    /// The name of the artifact.
    pub name: String,
    /// The size of the archive.
    #[serde(default)]
    pub size_in_bytes: u64,
    /// The API URL of the archive, requiring authentication.
    #[serde(default)]
    pub archive_download_url: String,
    /// Whether the artifact has expired and can no longer be downloaded.
    #[serde(default)]
    pub expired: bool,
    /// When the artifact was created.
    pub created_at: Option<String>,
    /// When the artifact expires.
    pub expires_at: Option<String>,
    /// The workflow run that produced the artifact.
    pub workflow_run: Option<WorkflowRun>,
}

impl Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Lists the artifacts of workflow runs in one repository.
#[async_trait]
pub trait ArtifactService: Send + Sync {
    /// Lists every artifact attached to a workflow run, in the order the service returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or answers with an error.
    async fn list_artifacts(&self, run_id: u64) -> anyhow::Result<Vec<Artifact>>;
}

impl GitHub {
    async fn artifacts_page(&self, run_id: u64, page: u32) -> anyhow::Result<Vec<Artifact>> {
        let artifacts: Artifacts = self
            .get_page(&format!("actions/runs/{run_id}/artifacts"), page, &[])
            .await?;
        debug!(
            "fetched {} of {} artifacts on page {page}",
            artifacts.artifacts.len(),
            artifacts.total_count
        );
        Ok(artifacts.artifacts)
    }
}

#[async_trait]
impl ArtifactService for GitHub {
    async fn list_artifacts(&self, run_id: u64) -> anyhow::Result<Vec<Artifact>> {
        paginate(move |page| self.artifacts_page(run_id, page))
            .try_concat()
            .await
    }
}
