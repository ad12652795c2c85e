use tracing::{debug, info};

use crate::{
    error::{NotifyError, NotifyResult},
    workflow::artifact::{Artifact, ArtifactService},
};

/// Fetches every artifact of a workflow run.
///
/// # Errors
///
/// Returns [`NotifyError::NoArtifacts`] if the run has no artifacts, or [`NotifyError::Api`] if
/// listing them fails.
pub async fn fetch_artifacts<A>(artifacts: &A, run_id: u64) -> NotifyResult<Vec<Artifact>>
where
    A: ArtifactService + ?Sized,
{
    debug!("fetching artifacts of run {run_id}…");

    match artifacts.list_artifacts(run_id).await? {
        artifacts if artifacts.is_empty() => Err(NotifyError::NoArtifacts { run_id }),
        artifacts => {
            match artifacts.len() {
                1 => info!("fetched 1 artifact of run {run_id}"),
                count => info!("fetched {count} artifacts of run {run_id}"),
            }
            for artifact in &artifacts {
                debug!("found artifact {artifact}");
            }
            Ok(artifacts)
        }
    }
}
