//! Binary entry point for `artifact-notifier`.
//!
//! Meant to run in a job triggered by a `workflow_run` event. Everything is read from the
//! environment of the job; there are no command-line options.

use artifact_notifier::{
    context::TriggerContext,
    env,
    github::GitHub,
    notifier::{Notifier, NotifierOptions, conclude},
};
use tracing_subscriber::EnvFilter;

/// Main entry point for the artifact-notifier binary.
///
/// Exits successfully when there is no pull request or no artifact to notify about, as those are
/// only reported. Any other failure exits with an error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();

    let context = TriggerContext::from_env().await?;
    let github = GitHub::new(env::github_token()?, context.repository.clone());
    let notifier = Notifier::new(
        github.clone(),
        github.clone(),
        github,
        context,
        NotifierOptions::from_env(),
    );

    conclude(notifier.run().await)
}
