use std::sync::Arc;

use crate::error::AppError;
use crate::repository::ReplyRepository;

#[derive(Debug, Clone)]
pub struct DeleteReply {
    pub reply_id: String,
    pub comment_id: String,
    pub thread_id: String,
    pub user_id: String,
}

pub struct DeleteReplyHandler {
    replies: Arc<dyn ReplyRepository>,
}

impl DeleteReplyHandler {
    pub fn new(replies: Arc<dyn ReplyRepository>) -> Self {
        Self { replies }
    }

    pub async fn execute(&self, cmd: &DeleteReply) -> Result<(), AppError> {
        self.replies
            .verify_available_reply(&cmd.reply_id, &cmd.comment_id, &cmd.thread_id)
            .await?;
        if let Err(err) = self.replies.verify_reply_owner(&cmd.reply_id, &cmd.user_id).await {
            tracing::warn!(
                reply_id = %cmd.reply_id,
                user_id = %cmd.user_id,
                "reply deletion denied"
            );
            return Err(err);
        }
        self.replies.delete_reply_by_id(&cmd.reply_id).await?;

        tracing::debug!(reply_id = %cmd.reply_id, "reply soft-deleted");
        Ok(())
    }
}
