use std::sync::Arc;

use forum_shared::AddedReply;

use crate::error::AppError;
use crate::repository::{CommentRepository, ReplyRepository, ThreadRepository};

#[derive(Debug, Clone)]
pub struct AddReply {
    pub thread_id: String,
    pub comment_id: String,
    pub owner: String,
    pub content: String,
}

pub struct AddReplyHandler {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl AddReplyHandler {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        comments: Arc<dyn CommentRepository>,
        replies: Arc<dyn ReplyRepository>,
    ) -> Self {
        Self {
            threads,
            comments,
            replies,
        }
    }

    pub async fn execute(&self, cmd: &AddReply) -> Result<AddedReply, AppError> {
        self.threads.verify_available_thread(&cmd.thread_id).await?;
        self.comments
            .verify_available_comment_in_thread(&cmd.comment_id, &cmd.thread_id)
            .await?;

        let added = self
            .replies
            .add_reply(&cmd.content, &cmd.comment_id, &cmd.owner)
            .await?;

        tracing::debug!(
            reply_id = %added.id,
            comment_id = %cmd.comment_id,
            "reply added"
        );
        Ok(added)
    }
}
