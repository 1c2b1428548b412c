use std::sync::Arc;

use crate::error::AppError;
use crate::repository::CommentRepository;

#[derive(Debug, Clone)]
pub struct DeleteComment {
    pub comment_id: String,
    pub thread_id: String,
    pub user_id: String,
}

pub struct DeleteCommentHandler {
    comments: Arc<dyn CommentRepository>,
}

impl DeleteCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    /// Availability in the thread is checked before ownership, so callers
    /// learn nothing about who owns a comment they cannot see.
    pub async fn execute(&self, cmd: &DeleteComment) -> Result<(), AppError> {
        self.comments
            .verify_available_comment_in_thread(&cmd.comment_id, &cmd.thread_id)
            .await?;
        if let Err(err) = self.comments.verify_comment_owner(&cmd.comment_id, &cmd.user_id).await {
            tracing::warn!(
                comment_id = %cmd.comment_id,
                user_id = %cmd.user_id,
                "comment deletion denied"
            );
            return Err(err);
        }
        self.comments.delete_comment_by_id(&cmd.comment_id).await?;

        tracing::debug!(comment_id = %cmd.comment_id, "comment soft-deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::RecordingCommentRepository;

    fn command() -> DeleteComment {
        DeleteComment {
            comment_id: "comment-123".to_string(),
            thread_id: "thread-123".to_string(),
            user_id: "user-123".to_string(),
        }
    }

    #[tokio::test]
    async fn orchestrates_availability_owner_then_delete() {
        let comments = Arc::new(RecordingCommentRepository::default());
        let handler = DeleteCommentHandler::new(comments.clone());

        handler.execute(&command()).await.unwrap();

        assert_eq!(
            comments.calls(),
            [
                "verify_available_comment_in_thread(comment-123, thread-123)",
                "verify_comment_owner(comment-123, user-123)",
                "delete_comment_by_id(comment-123)",
            ]
        );
    }

    #[tokio::test]
    async fn unavailable_comment_skips_owner_check() {
        let comments = Arc::new(RecordingCommentRepository::failing_at(
            "verify_available_comment_in_thread",
        ));
        let handler = DeleteCommentHandler::new(comments.clone());

        let result = handler.execute(&command()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(comments.calls().len(), 1);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_nothing_is_deleted() {
        let comments = Arc::new(RecordingCommentRepository::failing_at("verify_comment_owner"));
        let handler = DeleteCommentHandler::new(comments.clone());

        let result = handler.execute(&command()).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(!comments
            .calls()
            .iter()
            .any(|c| c.starts_with("delete_comment_by_id")));
    }
}
