//! Pre-made transactions, one per step of a notification.
//!
//! Each transaction takes its collaborator explicitly, so they can be run on their own as well as
//! through [`Notifier`](crate::notifier::Notifier).

mod fetch_artifacts;
mod format_message;
mod resolve_pull_request;
mod upsert_comment;

pub use fetch_artifacts::*;
pub use format_message::*;
pub use resolve_pull_request::*;
pub use upsert_comment::*;
