//! Storage capabilities, one trait per entity kind.
//!
//! Command handlers only ever talk to these traits. Each method maps to a
//! single statement against the store, and failures come back as
//! [`AppError::NotFound`] or [`AppError::Forbidden`] for the caller to
//! propagate unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use forum_shared::{
    AddedComment, AddedReply, AddedThread, CommentWithAuthor, ReplyWithAuthor, ThreadWithAuthor,
};

use crate::db::DbPool;
use crate::error::AppError;
use crate::ids::IdGenerator;

pub mod memory;
pub mod postgres;

pub(crate) const THREAD_NOT_FOUND: &str = "thread not found";
pub(crate) const COMMENT_NOT_FOUND: &str = "comment not found";
pub(crate) const COMMENT_NOT_IN_THREAD: &str = "comment not found in this thread";
pub(crate) const REPLY_NOT_FOUND: &str = "reply not found";
pub(crate) const ACCESS_DENIED: &str = "you are not allowed to access this resource";

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn add_thread(&self, owner: &str, title: &str, body: &str)
        -> Result<AddedThread, AppError>;

    /// Fails with `NotFound` when no thread has this id.
    async fn verify_available_thread(&self, thread_id: &str) -> Result<(), AppError>;

    async fn get_thread_by_id(&self, thread_id: &str) -> Result<ThreadWithAuthor, AppError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Does not check that the thread exists.
    async fn add_comment(
        &self,
        thread_id: &str,
        owner: &str,
        content: &str,
    ) -> Result<AddedComment, AppError>;

    /// Fails with `NotFound` unless the comment exists in `thread_id` and is
    /// not deleted.
    async fn verify_available_comment_in_thread(
        &self,
        comment_id: &str,
        thread_id: &str,
    ) -> Result<(), AppError>;

    /// Fails with `Forbidden` unless `user_id` wrote the comment. Deleted
    /// comments still pass for their owner.
    async fn verify_comment_owner(&self, comment_id: &str, user_id: &str) -> Result<(), AppError>;

    /// Sets the deleted flag. Fails with `NotFound` only when no row exists.
    async fn delete_comment_by_id(&self, comment_id: &str) -> Result<(), AppError>;

    /// All comments of the thread, deleted ones included, oldest first.
    async fn get_comments_by_thread_id(
        &self,
        thread_id: &str,
    ) -> Result<Vec<CommentWithAuthor>, AppError>;
}

#[async_trait]
pub trait ReplyRepository: Send + Sync {
    async fn add_reply(
        &self,
        content: &str,
        comment_id: &str,
        owner: &str,
    ) -> Result<AddedReply, AppError>;

    async fn verify_reply_owner(&self, reply_id: &str, user_id: &str) -> Result<(), AppError>;

    async fn delete_reply_by_id(&self, reply_id: &str) -> Result<(), AppError>;

    /// Replies of every comment in the thread, grouped by parent comment in
    /// comment order, then oldest first within each comment.
    async fn get_replies_by_thread_id(
        &self,
        thread_id: &str,
    ) -> Result<Vec<ReplyWithAuthor>, AppError>;

    /// Fails with `NotFound` unless the reply and its parent comment are both
    /// live and the reply sits under `comment_id` in `thread_id`.
    async fn verify_available_reply(
        &self,
        reply_id: &str,
        comment_id: &str,
        thread_id: &str,
    ) -> Result<(), AppError>;
}

/// The repository handles shared by every request.
#[derive(Clone)]
pub struct Repositories {
    pub threads: Arc<dyn ThreadRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub replies: Arc<dyn ReplyRepository>,
}

impl Repositories {
    pub fn postgres(pool: DbPool, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            threads: Arc::new(postgres::PgThreadRepository::new(pool.clone(), ids.clone())),
            comments: Arc::new(postgres::PgCommentRepository::new(pool.clone(), ids.clone())),
            replies: Arc::new(postgres::PgReplyRepository::new(pool, ids)),
        }
    }

    pub fn in_memory(store: &memory::InMemoryStore) -> Self {
        Self {
            threads: Arc::new(store.threads()),
            comments: Arc::new(store.comments()),
            replies: Arc::new(store.replies()),
        }
    }
}
