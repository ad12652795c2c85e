//! Pull requests from GitHub REST API.

use std::fmt::Display;

use async_trait::async_trait;
use serde::Deserialize;

use crate::github::GitHub;

/// Represents a pull request from GitHub REST API.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PullRequest {
    /// The number shared with the issue of the pull request.
    pub number: u64,
    /// The branch the changes are on.
    pub head: PullRequestHead,
    /// The title of the pull request.
    #[serde(default)]
    pub title: String,
    /// The web page of the pull request.
    #[serde(default)]
    pub html_url: String,
}

/// Represents the head branch of a pull request.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PullRequestHead {
    /// The commit the branch points to.
    pub sha: String,
    /// The name of the branch.
    #[serde(rename = "ref", default)]
    pub ref_name: String,
}

impl Display for PullRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} ({} at {})", self.number, self.head.ref_name, self.head.sha)
    }
}

/// Lists the open pull requests of one repository.
#[async_trait]
pub trait PullRequestService: Send + Sync {
    /// Lists one page of open pull requests, starting at page 1.
    ///
    /// A page holding less than [`PER_PAGE`](crate::github::paginate::PER_PAGE) pull requests is
    /// the last one.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or answers with an error.
    async fn list_pull_requests(&self, page: u32) -> anyhow::Result<Vec<PullRequest>>;
}

#[async_trait]
impl PullRequestService for GitHub {
    async fn list_pull_requests(&self, page: u32) -> anyhow::Result<Vec<PullRequest>> {
        self.get_page("pulls", page, &[("state", "open")]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_rest_payload() {
        let pulls: Vec<PullRequest> = serde_json::from_str(
            r#"[{
                "id": 1,
                "number": 1347,
                "state": "open",
                "title": "Amazing new feature",
                "html_url": "https://github.com/octocat/Hello-World/pull/1347",
                "head": {
                    "label": "octocat:new-topic",
                    "ref": "new-topic",
                    "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e"
                }
            }]"#,
        )
        .unwrap();

        assert_eq!(pulls[0].number, 1347);
        assert_eq!(pulls[0].head.ref_name, "new-topic");
        assert_eq!(
            pulls[0].to_string(),
            "#1347 (new-topic at 6dcb09b5b57875f334f61aebed695e2e4193db5e)"
        );
    }
}
