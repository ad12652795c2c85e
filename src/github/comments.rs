//! Issue comments from GitHub REST API.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::github::GitHub;

/// Represents an issue comment from GitHub REST API.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// The id of the comment.
    pub id: u64,
    /// The author, missing if the account has been deleted.
    pub user: Option<User>,
    /// The Markdown body of the comment.
    #[serde(default)]
    pub body: Option<String>,
    /// The web page of the comment.
    #[serde(default)]
    pub html_url: String,
}

impl Comment {
    /// Whether the comment was written by the account with the given login.
    pub fn is_authored_by(&self, login: &str) -> bool {
        self.user.as_ref().is_some_and(|user| user.login == login)
    }
}

/// Represents a user from GitHub REST API.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// The login of the account.
    pub login: String,
}

#[derive(Debug, Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

/// Lists, creates and updates the comments on issues and pull requests of one repository.
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Lists one page of comments on an issue or pull request, oldest first, starting at page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or answers with an error.
    async fn list_comments(&self, issue_number: u64, page: u32) -> anyhow::Result<Vec<Comment>>;

    /// Creates a comment on an issue or pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or answers with an error.
    async fn create_comment(&self, issue_number: u64, body: &str) -> anyhow::Result<Comment>;

    /// Replaces the body of an existing comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or answers with an error.
    async fn update_comment(&self, comment_id: u64, body: &str) -> anyhow::Result<Comment>;
}

#[async_trait]
impl CommentService for GitHub {
    async fn list_comments(&self, issue_number: u64, page: u32) -> anyhow::Result<Vec<Comment>> {
        self.get_page(&format!("issues/{issue_number}/comments"), page, &[])
            .await
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> anyhow::Result<Comment> {
        self.send_json(
            Method::POST,
            &format!("issues/{issue_number}/comments"),
            &CommentBody { body },
        )
        .await
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> anyhow::Result<Comment> {
        self.send_json(
            Method::PATCH,
            &format!("issues/comments/{comment_id}"),
            &CommentBody { body },
        )
        .await
    }
}
