//! The context a notification is triggered in.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context as _, anyhow};
use tracing::debug;

use crate::{env, workflow::WorkflowRunEvent};

/// A repository on GitHub, identified by its owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    /// The login of the user or organization owning the repository.
    pub owner: String,
    /// The name of the repository.
    pub name: String,
}

impl Repository {
    /// Creates a [`Repository`] from its owner and name.
    pub fn new<O, N>(owner: O, name: N) -> Self
    where
        O: Into<String>,
        N: Into<String>,
    {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for Repository {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(anyhow!("invalid repository {s:?}, expected `owner/name`")),
        }
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything a notification needs to know about the workflow run that triggered it.
///
/// Built once at entry and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    /// The repository both the workflow run and the pull request belong to.
    pub repository: Repository,
    /// The id of the workflow run whose artifacts are linked.
    pub run_id: u64,
    /// The head commit of the workflow run, matched against pull request heads.
    pub head_sha: String,
}

impl TriggerContext {
    /// Builds a [`TriggerContext`] from a `workflow_run` event payload.
    pub fn from_event(repository: Repository, event: &WorkflowRunEvent) -> Self {
        Self {
            repository,
            run_id: event.workflow_run.id,
            head_sha: event.workflow_run.head_sha.clone(),
        }
    }

    /// Reads a [`TriggerContext`] from the environment of a GitHub Actions job.
    ///
    /// See [`Self::resolve`] for how `NOTIFIER_RUN_ID` and `NOTIFIER_HEAD_SHA` combine with the
    /// payload at `GITHUB_EVENT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the event payload cannot be read.
    pub async fn from_env() -> anyhow::Result<Self> {
        let overrides = Overrides {
            run_id: env::run_id_override()?,
            head_sha: env::head_sha_override(),
        };
        Self::resolve(env::repository()?, overrides, env::event_path()).await
    }

    /// Builds a [`TriggerContext`] from overrides, falling back to the event payload at
    /// `event_path` for whatever is not overridden.
    ///
    /// The payload is only read if an override is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is needed but `event_path` is missing or unreadable.
    pub async fn resolve(
        repository: Repository,
        overrides: Overrides,
        event_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        if let Overrides {
            run_id: Some(run_id),
            head_sha: Some(head_sha),
        } = overrides
        {
            debug!("using run {run_id} at {head_sha} from overrides");
            return Ok(Self {
                repository,
                run_id,
                head_sha,
            });
        }

        let event_path = event_path.context("GITHUB_EVENT_PATH not set in environment")?;
        let event = read_event(&event_path).await?;
        let mut context = Self::from_event(repository, &event);
        if let Some(run_id) = overrides.run_id {
            context.run_id = run_id;
        }
        if let Some(head_sha) = overrides.head_sha {
            context.head_sha = head_sha;
        }

        debug!(
            "using run {} at {} of {}",
            context.run_id, context.head_sha, context.repository
        );
        Ok(context)
    }
}

/// Values taking precedence over the triggering event, for runs outside a `workflow_run` job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// The id of the workflow run, from `NOTIFIER_RUN_ID`.
    pub run_id: Option<u64>,
    /// The head commit, from `NOTIFIER_HEAD_SHA`.
    pub head_sha: Option<String>,
}

/// Reads and parses a `workflow_run` event payload.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a workflow run.
pub async fn read_event(path: &Path) -> anyhow::Result<WorkflowRunEvent> {
    let payload = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read event payload at {}", path.display()))?;
    serde_json::from_str(&payload)
        .with_context(|| format!("invalid workflow_run event payload at {}", path.display()))
}
