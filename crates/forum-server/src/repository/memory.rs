//! In-process store implementing every repository trait.
//!
//! Used by the test suites and local experiments. Each repository call takes
//! the table lock once, which gives the same single-statement atomicity the
//! PostgreSQL implementation relies on.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use forum_shared::{
    AddedComment, AddedReply, AddedThread, Comment, CommentWithAuthor, Reply, ReplyWithAuthor,
    Thread, ThreadWithAuthor, User,
};
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::repository::{
    CommentRepository, ReplyRepository, ThreadRepository, ACCESS_DENIED, COMMENT_NOT_FOUND,
    COMMENT_NOT_IN_THREAD, REPLY_NOT_FOUND, THREAD_NOT_FOUND,
};

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    threads: Vec<Thread>,
    comments: Vec<Comment>,
    replies: Vec<Reply>,
}

impl Tables {
    fn username(&self, user_id: &str) -> Option<String> {
        self.users.get(user_id).map(|u| u.username.clone())
    }

    fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}

#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    ids: Arc<dyn IdGenerator>,
}

impl InMemoryStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            ids,
        }
    }

    pub fn threads(&self) -> MemoryThreadRepository {
        MemoryThreadRepository { store: self.clone() }
    }

    pub fn comments(&self) -> MemoryCommentRepository {
        MemoryCommentRepository { store: self.clone() }
    }

    pub fn replies(&self) -> MemoryReplyRepository {
        MemoryReplyRepository { store: self.clone() }
    }

    pub async fn insert_user(&self, user: User) {
        self.tables.write().await.users.insert(user.id.clone(), user);
    }

    /// Seeds a row as-is, bypassing id generation and timestamps.
    pub async fn insert_thread(&self, thread: Thread) {
        self.tables.write().await.threads.push(thread);
    }

    pub async fn insert_comment(&self, comment: Comment) {
        self.tables.write().await.comments.push(comment);
    }

    pub async fn insert_reply(&self, reply: Reply) {
        self.tables.write().await.replies.push(reply);
    }

    pub async fn find_comment(&self, comment_id: &str) -> Option<Comment> {
        self.tables.read().await.comment(comment_id).cloned()
    }

    pub async fn find_reply(&self, reply_id: &str) -> Option<Reply> {
        self.tables
            .read()
            .await
            .replies
            .iter()
            .find(|r| r.id == reply_id)
            .cloned()
    }
}

fn duplicate_key(id: &str) -> AppError {
    AppError::Internal(anyhow!("duplicate key value: {}", id))
}

/// Mirrors the `owner REFERENCES users(id)` foreign keys.
fn unknown_owner(owner: &str) -> AppError {
    AppError::Internal(anyhow!("owner is not present in users: {}", owner))
}

pub struct MemoryThreadRepository {
    store: InMemoryStore,
}

#[async_trait]
impl ThreadRepository for MemoryThreadRepository {
    async fn add_thread(
        &self,
        owner: &str,
        title: &str,
        body: &str,
    ) -> Result<AddedThread, AppError> {
        let id = format!("thread-{}", self.store.ids.generate());
        let mut tables = self.store.tables.write().await;
        if tables.threads.iter().any(|t| t.id == id) {
            return Err(duplicate_key(&id));
        }
        if !tables.users.contains_key(owner) {
            return Err(unknown_owner(owner));
        }

        tables.threads.push(Thread {
            id: id.clone(),
            title: title.to_string(),
            body: body.to_string(),
            owner: owner.to_string(),
            date: Utc::now(),
        });

        Ok(AddedThread {
            id,
            title: title.to_string(),
            owner: owner.to_string(),
        })
    }

    async fn verify_available_thread(&self, thread_id: &str) -> Result<(), AppError> {
        let tables = self.store.tables.read().await;
        if !tables.threads.iter().any(|t| t.id == thread_id) {
            return Err(AppError::not_found(THREAD_NOT_FOUND));
        }
        Ok(())
    }

    async fn get_thread_by_id(&self, thread_id: &str) -> Result<ThreadWithAuthor, AppError> {
        let tables = self.store.tables.read().await;
        tables
            .threads
            .iter()
            .find(|t| t.id == thread_id)
            .and_then(|t| {
                Some(ThreadWithAuthor {
                    id: t.id.clone(),
                    title: t.title.clone(),
                    body: t.body.clone(),
                    date: t.date,
                    username: tables.username(&t.owner)?,
                })
            })
            .ok_or_else(|| AppError::not_found(THREAD_NOT_FOUND))
    }
}

pub struct MemoryCommentRepository {
    store: InMemoryStore,
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn add_comment(
        &self,
        thread_id: &str,
        owner: &str,
        content: &str,
    ) -> Result<AddedComment, AppError> {
        let id = format!("comment-{}", self.store.ids.generate());
        let mut tables = self.store.tables.write().await;
        if tables.comment(&id).is_some() {
            return Err(duplicate_key(&id));
        }
        if !tables.users.contains_key(owner) {
            return Err(unknown_owner(owner));
        }

        tables.comments.push(Comment {
            id: id.clone(),
            thread_id: thread_id.to_string(),
            owner: owner.to_string(),
            content: content.to_string(),
            date: Utc::now(),
            is_deleted: false,
        });

        Ok(AddedComment {
            id,
            content: content.to_string(),
            owner: owner.to_string(),
        })
    }

    async fn verify_available_comment_in_thread(
        &self,
        comment_id: &str,
        thread_id: &str,
    ) -> Result<(), AppError> {
        let tables = self.store.tables.read().await;
        match tables.comment(comment_id) {
            Some(c) if c.thread_id == thread_id && !c.is_deleted => Ok(()),
            _ => Err(AppError::not_found(COMMENT_NOT_IN_THREAD)),
        }
    }

    async fn verify_comment_owner(&self, comment_id: &str, user_id: &str) -> Result<(), AppError> {
        let tables = self.store.tables.read().await;
        match tables.comment(comment_id) {
            Some(c) if c.owner == user_id => Ok(()),
            _ => Err(AppError::forbidden(ACCESS_DENIED)),
        }
    }

    async fn delete_comment_by_id(&self, comment_id: &str) -> Result<(), AppError> {
        let mut tables = self.store.tables.write().await;
        let comment = tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| AppError::not_found(COMMENT_NOT_FOUND))?;

        comment.is_deleted = true;
        Ok(())
    }

    async fn get_comments_by_thread_id(
        &self,
        thread_id: &str,
    ) -> Result<Vec<CommentWithAuthor>, AppError> {
        let tables = self.store.tables.read().await;
        let mut comments: Vec<CommentWithAuthor> = tables
            .comments
            .iter()
            .filter(|c| c.thread_id == thread_id)
            .filter_map(|c| {
                Some(CommentWithAuthor {
                    id: c.id.clone(),
                    username: tables.username(&c.owner)?,
                    date: c.date,
                    content: c.content.clone(),
                    is_deleted: c.is_deleted,
                })
            })
            .collect();

        comments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }
}

pub struct MemoryReplyRepository {
    store: InMemoryStore,
}

#[async_trait]
impl ReplyRepository for MemoryReplyRepository {
    async fn add_reply(
        &self,
        content: &str,
        comment_id: &str,
        owner: &str,
    ) -> Result<AddedReply, AppError> {
        let id = format!("reply-{}", self.store.ids.generate());
        let mut tables = self.store.tables.write().await;
        if tables.replies.iter().any(|r| r.id == id) {
            return Err(duplicate_key(&id));
        }
        if !tables.users.contains_key(owner) {
            return Err(unknown_owner(owner));
        }

        tables.replies.push(Reply {
            id: id.clone(),
            comment_id: comment_id.to_string(),
            owner: owner.to_string(),
            content: content.to_string(),
            date: Utc::now(),
            is_deleted: false,
        });

        Ok(AddedReply {
            id,
            content: content.to_string(),
            owner: owner.to_string(),
        })
    }

    async fn verify_reply_owner(&self, reply_id: &str, user_id: &str) -> Result<(), AppError> {
        let tables = self.store.tables.read().await;
        if !tables
            .replies
            .iter()
            .any(|r| r.id == reply_id && r.owner == user_id)
        {
            return Err(AppError::forbidden(ACCESS_DENIED));
        }
        Ok(())
    }

    async fn delete_reply_by_id(&self, reply_id: &str) -> Result<(), AppError> {
        let mut tables = self.store.tables.write().await;
        let reply = tables
            .replies
            .iter_mut()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| AppError::not_found(REPLY_NOT_FOUND))?;

        reply.is_deleted = true;
        Ok(())
    }

    async fn get_replies_by_thread_id(
        &self,
        thread_id: &str,
    ) -> Result<Vec<ReplyWithAuthor>, AppError> {
        let tables = self.store.tables.read().await;
        let mut rows: Vec<(&Comment, ReplyWithAuthor)> = tables
            .replies
            .iter()
            .filter_map(|r| {
                let parent = tables.comment(&r.comment_id)?;
                if parent.thread_id != thread_id {
                    return None;
                }
                let reply = ReplyWithAuthor {
                    id: r.id.clone(),
                    comment_id: r.comment_id.clone(),
                    username: tables.username(&r.owner)?,
                    date: r.date,
                    content: r.content.clone(),
                    is_deleted: r.is_deleted,
                };
                Some((parent, reply))
            })
            .collect();

        rows.sort_by(|(ca, ra), (cb, rb)| {
            ca.date
                .cmp(&cb.date)
                .then_with(|| ca.id.cmp(&cb.id))
                .then_with(|| ra.date.cmp(&rb.date))
        });

        Ok(rows.into_iter().map(|(_, reply)| reply).collect())
    }

    async fn verify_available_reply(
        &self,
        reply_id: &str,
        comment_id: &str,
        thread_id: &str,
    ) -> Result<(), AppError> {
        let tables = self.store.tables.read().await;
        let available = tables
            .replies
            .iter()
            .find(|r| r.id == reply_id)
            .filter(|r| !r.is_deleted && r.comment_id == comment_id)
            .and_then(|r| tables.comment(&r.comment_id))
            .is_some_and(|c| !c.is_deleted && c.thread_id == thread_id);

        if !available {
            return Err(AppError::not_found(REPLY_NOT_FOUND));
        }
        Ok(())
    }
}
