use std::pin::pin;

use futures::TryStreamExt as _;
use tracing::{debug, info};

use crate::{
    error::{NotifyError, NotifyResult},
    github::{paginate::paginate, pulls::PullRequestService},
};

/// Finds the number of the first open pull request whose head is at `head_sha`.
///
/// Pages of pull requests are fetched lazily and the search stops at the first match.
///
/// # Errors
///
/// Returns [`NotifyError::NoMatchingPullRequest`] if no open pull request matches, or
/// [`NotifyError::Api`] if listing the pull requests fails.
pub async fn resolve_pull_request<P>(pulls: &P, head_sha: &str) -> NotifyResult<u64>
where
    P: PullRequestService + ?Sized,
{
    debug!("looking for a pull request at {head_sha}…");
    let mut pages = pin!(paginate(move |page| pulls.list_pull_requests(page)));

    while let Some(page) = pages.try_next().await? {
        if let Some(pull) = page.into_iter().find(|pull| pull.head.sha == head_sha) {
            info!("using pull request {pull}");
            return Ok(pull.number);
        }
    }

    Err(NotifyError::NoMatchingPullRequest {
        head_sha: head_sha.to_owned(),
    })
}
