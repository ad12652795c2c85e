//! Runs the transactions of a notification in sequence.

use tracing::{error, info};

use crate::{
    context::TriggerContext,
    env::{BOT_LOGIN, MIRROR_URL},
    error::NotifyResult,
    github::{comments::CommentService, pulls::PullRequestService},
    transactions::{
        CommentAction, fetch_artifacts, format_message, resolve_pull_request, upsert_comment,
    },
    workflow::artifact::ArtifactService,
};

/// Tunables of a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierOptions {
    /// The base URL of the mirror serving artifacts, without a trailing slash.
    pub mirror_url: String,
    /// The login whose comment is updated instead of creating a new one.
    pub bot_login: String,
}

impl NotifierOptions {
    /// Reads the options from `NOTIFIER_MIRROR_URL` and `NOTIFIER_BOT_LOGIN`, falling back to the
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            mirror_url: MIRROR_URL.clone(),
            bot_login: BOT_LOGIN.clone(),
        }
    }
}

/// Links the artifacts of a workflow run from the pull request it was built for.
///
/// Resolves the pull request, fetches the artifacts, formats the message and upserts the comment,
/// each step feeding the next. Nothing is written to the pull request unless every prior step
/// succeeded.
#[derive(Debug)]
pub struct Notifier<P, A, C> {
    pulls: P,
    artifacts: A,
    comments: C,
    context: TriggerContext,
    options: NotifierOptions,
}

impl<P, A, C> Notifier<P, A, C>
where
    P: PullRequestService,
    A: ArtifactService,
    C: CommentService,
{
    /// Creates a [`Notifier`] from its collaborators.
    pub fn new(
        pulls: P,
        artifacts: A,
        comments: C,
        context: TriggerContext,
        options: NotifierOptions,
    ) -> Self {
        Self {
            pulls,
            artifacts,
            comments,
            context,
            options,
        }
    }

    /// Runs the notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::NoMatchingPullRequest`] or [`NotifyError::NoArtifacts`] if there is
    /// nothing to notify, or [`NotifyError::Api`] if a collaborator fails.
    ///
    /// [`NotifyError::NoMatchingPullRequest`]: crate::error::NotifyError::NoMatchingPullRequest
    /// [`NotifyError::NoArtifacts`]: crate::error::NotifyError::NoArtifacts
    /// [`NotifyError::Api`]: crate::error::NotifyError::Api
    pub async fn run(&self) -> NotifyResult<CommentAction> {
        let TriggerContext {
            repository,
            run_id,
            head_sha,
        } = &self.context;

        info!("notifying artifacts of run {run_id} in {repository}…");

        let issue_number = resolve_pull_request(&self.pulls, head_sha).await?;
        let artifacts = fetch_artifacts(&self.artifacts, *run_id).await?;
        let body = format_message(&self.options.mirror_url, repository, &artifacts);

        upsert_comment(&self.comments, issue_number, &self.options.bot_login, &body).await
    }
}

/// Maps the outcome of [`Notifier::run`] to the outcome of the job.
///
/// Reported errors are logged and count as success; nothing to notify is not a failure.
///
/// # Errors
///
/// Returns the error if a collaborator failed.
pub fn conclude(result: NotifyResult<CommentAction>) -> anyhow::Result<()> {
    match result {
        Ok(action) => {
            info!("{action}");
            Ok(())
        }
        Err(err) if err.is_reported() => {
            error!("{err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
