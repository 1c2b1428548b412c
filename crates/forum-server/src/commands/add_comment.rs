use std::sync::Arc;

use forum_shared::AddedComment;

use crate::error::AppError;
use crate::repository::{CommentRepository, ThreadRepository};

#[derive(Debug, Clone)]
pub struct AddComment {
    pub thread_id: String,
    pub owner: String,
    pub content: String,
}

pub struct AddCommentHandler {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl AddCommentHandler {
    pub fn new(threads: Arc<dyn ThreadRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { threads, comments }
    }

    pub async fn execute(&self, cmd: &AddComment) -> Result<AddedComment, AppError> {
        self.threads.verify_available_thread(&cmd.thread_id).await?;

        let added = self
            .comments
            .add_comment(&cmd.thread_id, &cmd.owner, &cmd.content)
            .await?;

        tracing::debug!(
            comment_id = %added.id,
            thread_id = %cmd.thread_id,
            "comment added"
        );
        Ok(added)
    }
}
