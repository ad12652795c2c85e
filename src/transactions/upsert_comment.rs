use std::{fmt::Display, pin::pin};

use futures::TryStreamExt as _;
use tracing::{debug, info};

use crate::{
    error::NotifyResult,
    github::{
        comments::{Comment, CommentService},
        paginate::paginate,
    },
};

/// What [`upsert_comment`] did to the pull request.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    /// A new comment was created.
    Created {
        /// The id of the new comment.
        id: u64,
    },
    /// An existing comment of the bot was updated.
    Updated {
        /// The id of the updated comment.
        id: u64,
    },
}

impl Display for CommentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created { id } => write!(f, "created comment {id}"),
            Self::Updated { id } => write!(f, "updated comment {id}"),
        }
    }
}

/// Finds the first comment on a pull request written by `bot_login`.
///
/// # Errors
///
/// Returns an error if listing the comments fails.
pub async fn find_bot_comment<C>(
    comments: &C,
    issue_number: u64,
    bot_login: &str,
) -> NotifyResult<Option<Comment>>
where
    C: CommentService + ?Sized,
{
    let mut pages = pin!(paginate(move |page| {
        comments.list_comments(issue_number, page)
    }));

    while let Some(page) = pages.try_next().await? {
        if let Some(comment) = page
            .into_iter()
            .find(|comment| comment.is_authored_by(bot_login))
        {
            return Ok(Some(comment));
        }
    }

    Ok(None)
}

/// Replaces the body of the comment `bot_login` left on a pull request, or creates one if there is
/// none.
///
/// # Errors
///
/// Returns an error if listing, creating or updating the comment fails.
pub async fn upsert_comment<C>(
    comments: &C,
    issue_number: u64,
    bot_login: &str,
    body: &str,
) -> NotifyResult<CommentAction>
where
    C: CommentService + ?Sized,
{
    debug!("looking for a comment by {bot_login} on pull request {issue_number}…");

    match find_bot_comment(comments, issue_number, bot_login).await? {
        Some(existing) => {
            info!("updating comment {}", existing.id);
            comments.update_comment(existing.id, body).await?;
            Ok(CommentAction::Updated { id: existing.id })
        }
        None => {
            info!("creating a comment");
            let comment = comments.create_comment(issue_number, body).await?;
            Ok(CommentAction::Created { id: comment.id })
        }
    }
}
