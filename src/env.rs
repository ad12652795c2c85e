//! Defines the environment variables to use.

use crate::{context::Repository, static_lazy_lock};

use anyhow::Context as _;
use std::{env, path::PathBuf};

/// Parses an environment variable from [`String`] to something else, wrapping any error in [`anyhow::Error`].
#[macro_export]
macro_rules! parse_env {
    ($key:expr => |$var:ident| $expr:expr) => {
        std::env::var($key)
            .map_err(|e| anyhow::anyhow!(e))
            .and_then(|$var| $expr)
    };
    ($key:expr => |$var:ident| $expr:expr; anyhow) => {
        $crate::parse_env!($key => |$var| $expr.map_err(|e| anyhow::anyhow!(e)))
    };
}

/// The default base URL of GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// The default mirror serving artifacts to anonymous users.
pub const DEFAULT_MIRROR_URL: &str = "https://nightly.link";

/// The default login of the account posting the notification comment.
pub const DEFAULT_BOT_LOGIN: &str = "github-actions[bot]";

static_lazy_lock! {
    /// The base URL of GitHub REST API, without a trailing slash.
    pub GITHUB_API_URL: String = env::var("GITHUB_API_URL")
        .map(|url| url.trim_end_matches('/').to_owned())
        .unwrap_or_else(|_| String::from(DEFAULT_GITHUB_API_URL));
}

static_lazy_lock! {
    /// The base URL of the artifact mirror, without a trailing slash.
    pub MIRROR_URL: String = env::var("NOTIFIER_MIRROR_URL")
        .map(|url| url.trim_end_matches('/').to_owned())
        .unwrap_or_else(|_| String::from(DEFAULT_MIRROR_URL));
}

static_lazy_lock! {
    /// The login whose comments are treated as the notification comment.
    pub BOT_LOGIN: String = env::var("NOTIFIER_BOT_LOGIN")
        .unwrap_or_else(|_| String::from(DEFAULT_BOT_LOGIN));
}

/// Reads the GitHub token.
///
/// # Errors
///
/// Returns an error if `GITHUB_TOKEN` is unset or empty.
pub fn github_token() -> anyhow::Result<String> {
    parse_env!("GITHUB_TOKEN" => |token| if token.is_empty() {
        Err(anyhow::anyhow!("empty value"))
    } else {
        Ok(token)
    })
    .context("GITHUB_TOKEN not set in environment")
}

/// Reads the repository the workflow runs in.
///
/// # Errors
///
/// Returns an error if `GITHUB_REPOSITORY` is unset or not in the `owner/name` form.
pub fn repository() -> anyhow::Result<Repository> {
    parse_env!("GITHUB_REPOSITORY" => |repository| repository.parse::<Repository>())
        .context("failed to read GITHUB_REPOSITORY")
}

/// Reads the path to the JSON payload of the triggering event, if any.
pub fn event_path() -> Option<PathBuf> {
    parse_env!("GITHUB_EVENT_PATH" => |path| Ok(PathBuf::from(path))).ok()
}

/// Reads the run id overriding the one of the triggering event, if any.
///
/// An empty `NOTIFIER_RUN_ID` counts as unset.
///
/// # Errors
///
/// Returns an error if `NOTIFIER_RUN_ID` is set but is not a number.
pub fn run_id_override() -> anyhow::Result<Option<u64>> {
    parse_run_id(env::var("NOTIFIER_RUN_ID").ok())
}

fn parse_run_id(value: Option<String>) -> anyhow::Result<Option<u64>> {
    value
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u64>()
                .with_context(|| format!("failed to parse NOTIFIER_RUN_ID {id:?}"))
        })
        .transpose()
}

/// Reads the head commit SHA overriding the one of the triggering event, if any.
pub fn head_sha_override() -> Option<String> {
    env::var("NOTIFIER_HEAD_SHA")
        .ok()
        .filter(|sha| !sha.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_id_is_unset() {
        assert_eq!(parse_run_id(Some(String::new())).unwrap(), None);
        assert_eq!(parse_run_id(None).unwrap(), None);
    }

    #[test]
    fn parses_run_id() {
        assert_eq!(
            parse_run_id(Some(String::from("30433642"))).unwrap(),
            Some(30433642)
        );
        assert!(parse_run_id(Some(String::from("latest"))).is_err());
    }
}
