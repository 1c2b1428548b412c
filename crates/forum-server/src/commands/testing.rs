//! Repository doubles that record every call and can fail at a named step.

use std::sync::Mutex;

use async_trait::async_trait;
use forum_shared::{
    AddedComment, AddedReply, AddedThread, CommentWithAuthor, ReplyWithAuthor, ThreadWithAuthor,
};

use crate::error::AppError;
use crate::repository::{CommentRepository, ReplyRepository, ThreadRepository};

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
    fail_at: Option<&'static str>,
}

impl Recorder {
    fn record(&self, method: &'static str, args: &[&str]) -> Result<(), AppError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}({})", method, args.join(", ")));

        match self.fail_at {
            Some(step) if step == method && method.ends_with("_owner") => {
                Err(AppError::forbidden("not the owner"))
            }
            Some(step) if step == method => Err(AppError::not_found("not found")),
            _ => Ok(()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

macro_rules! recording_repository {
    ($name:ident) => {
        #[derive(Default)]
        pub(crate) struct $name {
            recorder: Recorder,
        }

        impl $name {
            pub(crate) fn failing_at(method: &'static str) -> Self {
                Self {
                    recorder: Recorder {
                        calls: Mutex::default(),
                        fail_at: Some(method),
                    },
                }
            }

            pub(crate) fn calls(&self) -> Vec<String> {
                self.recorder.calls()
            }
        }
    };
}

recording_repository!(RecordingThreadRepository);
recording_repository!(RecordingCommentRepository);
recording_repository!(RecordingReplyRepository);

#[async_trait]
impl ThreadRepository for RecordingThreadRepository {
    async fn add_thread(
        &self,
        owner: &str,
        title: &str,
        body: &str,
    ) -> Result<AddedThread, AppError> {
        self.recorder.record("add_thread", &[owner, title, body])?;
        Ok(AddedThread {
            id: "thread-123".to_string(),
            title: title.to_string(),
            owner: owner.to_string(),
        })
    }

    async fn verify_available_thread(&self, thread_id: &str) -> Result<(), AppError> {
        self.recorder.record("verify_available_thread", &[thread_id])
    }

    async fn get_thread_by_id(&self, thread_id: &str) -> Result<ThreadWithAuthor, AppError> {
        self.recorder.record("get_thread_by_id", &[thread_id])?;
        Err(AppError::not_found("no fixture"))
    }
}

#[async_trait]
impl CommentRepository for RecordingCommentRepository {
    async fn add_comment(
        &self,
        thread_id: &str,
        owner: &str,
        content: &str,
    ) -> Result<AddedComment, AppError> {
        self.recorder
            .record("add_comment", &[thread_id, owner, content])?;
        Ok(AddedComment {
            id: "comment-123".to_string(),
            content: content.to_string(),
            owner: owner.to_string(),
        })
    }

    async fn verify_available_comment_in_thread(
        &self,
        comment_id: &str,
        thread_id: &str,
    ) -> Result<(), AppError> {
        self.recorder
            .record("verify_available_comment_in_thread", &[comment_id, thread_id])
    }

    async fn verify_comment_owner(&self, comment_id: &str, user_id: &str) -> Result<(), AppError> {
        self.recorder
            .record("verify_comment_owner", &[comment_id, user_id])
    }

    async fn delete_comment_by_id(&self, comment_id: &str) -> Result<(), AppError> {
        self.recorder.record("delete_comment_by_id", &[comment_id])
    }

    async fn get_comments_by_thread_id(
        &self,
        thread_id: &str,
    ) -> Result<Vec<CommentWithAuthor>, AppError> {
        self.recorder
            .record("get_comments_by_thread_id", &[thread_id])?;
        Ok(Vec::new())
    }
}

#[async_trait]
impl ReplyRepository for RecordingReplyRepository {
    async fn add_reply(
        &self,
        content: &str,
        comment_id: &str,
        owner: &str,
    ) -> Result<AddedReply, AppError> {
        self.recorder
            .record("add_reply", &[content, comment_id, owner])?;
        Ok(AddedReply {
            id: "reply-123".to_string(),
            content: content.to_string(),
            owner: owner.to_string(),
        })
    }

    async fn verify_reply_owner(&self, reply_id: &str, user_id: &str) -> Result<(), AppError> {
        self.recorder.record("verify_reply_owner", &[reply_id, user_id])
    }

    async fn delete_reply_by_id(&self, reply_id: &str) -> Result<(), AppError> {
        self.recorder.record("delete_reply_by_id", &[reply_id])
    }

    async fn get_replies_by_thread_id(
        &self,
        thread_id: &str,
    ) -> Result<Vec<ReplyWithAuthor>, AppError> {
        self.recorder
            .record("get_replies_by_thread_id", &[thread_id])?;
        Ok(Vec::new())
    }

    async fn verify_available_reply(
        &self,
        reply_id: &str,
        comment_id: &str,
        thread_id: &str,
    ) -> Result<(), AppError> {
        self.recorder
            .record("verify_available_reply", &[reply_id, comment_id, thread_id])
    }
}
