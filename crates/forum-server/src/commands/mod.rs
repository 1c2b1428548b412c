//! Command handlers, one per mutating action.
//!
//! Handlers check business preconditions through the repository traits and
//! stop at the first failure. The mutating call always comes last, so an
//! aborted command never leaves a partial write behind.

mod add_comment;
mod add_reply;
mod add_thread;
mod delete_comment;
mod delete_reply;

#[cfg(test)]
pub(crate) mod testing;

pub use add_comment::{AddComment, AddCommentHandler};
pub use add_reply::{AddReply, AddReplyHandler};
pub use add_thread::{AddThread, AddThreadHandler};
pub use delete_comment::{DeleteComment, DeleteCommentHandler};
pub use delete_reply::{DeleteReply, DeleteReplyHandler};
