//! Read-side assembly of a thread with its comment and reply tree.

use std::collections::HashMap;
use std::sync::Arc;

use forum_shared::api::{CommentDetail, ReplyDetail, ThreadDetail};

use crate::error::AppError;
use crate::repository::{CommentRepository, ReplyRepository, ThreadRepository};

pub const DELETED_COMMENT_CONTENT: &str = "**comment has been deleted**";
pub const DELETED_REPLY_CONTENT: &str = "**reply has been deleted**";

fn visible(content: String, is_deleted: bool, placeholder: &str) -> String {
    if is_deleted {
        placeholder.to_string()
    } else {
        content
    }
}

pub struct ThreadDetailResolver {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl ThreadDetailResolver {
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

    /// Deleted comments and replies keep their slot, author and date; only
    /// the content is replaced.
    pub async fn resolve(&self, thread_id: &str) -> Result<ThreadDetail, AppError> {
        let thread = self.threads.get_thread_by_id(thread_id).await?;
        let comments = self.comments.get_comments_by_thread_id(thread_id).await?;
        let replies = self.replies.get_replies_by_thread_id(thread_id).await?;

        let mut replies_by_comment: HashMap<String, Vec<ReplyDetail>> = HashMap::new();
        for reply in replies {
            replies_by_comment
                .entry(reply.comment_id)
                .or_default()
                .push(ReplyDetail {
                    id: reply.id,
                    username: reply.username,
                    date: reply.date,
                    content: visible(reply.content, reply.is_deleted, DELETED_REPLY_CONTENT),
                    is_deleted: reply.is_deleted,
                });
        }

        let comments = comments
            .into_iter()
            .map(|comment| CommentDetail {
                replies: replies_by_comment.remove(&comment.id).unwrap_or_default(),
                id: comment.id,
                username: comment.username,
                date: comment.date,
                content: visible(comment.content, comment.is_deleted, DELETED_COMMENT_CONTENT),
                is_deleted: comment.is_deleted,
            })
            .collect();

        tracing::debug!(thread_id, "thread detail resolved");

        Ok(ThreadDetail {
            id: thread.id,
            title: thread.title,
            body: thread.body,
            date: thread.date,
            username: thread.username,
            comments,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use forum_shared::{Comment, Reply, Thread, User};

    use super::*;
    use crate::ids::FixedIdGenerator;
    use crate::repository::memory::InMemoryStore;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    async fn store_with_thread() -> InMemoryStore {
        let store = InMemoryStore::new(Arc::new(FixedIdGenerator("123".to_string())));
        store
            .insert_user(User {
                id: "user-123".to_string(),
                username: "dicoding".to_string(),
                fullname: "Dicoding Indonesia".to_string(),
            })
            .await;
        store
            .insert_user(User {
                id: "user-456".to_string(),
                username: "johndoe".to_string(),
                fullname: "John Doe".to_string(),
            })
            .await;
        store
            .insert_thread(Thread {
                id: "thread-123".to_string(),
                title: "sebuah thread".to_string(),
                body: "sebuah body thread".to_string(),
                owner: "user-123".to_string(),
                date: at(0),
            })
            .await;
        store
    }

    fn resolver(store: &InMemoryStore) -> ThreadDetailResolver {
        ThreadDetailResolver::new(
            Arc::new(store.threads()),
            Arc::new(store.comments()),
            Arc::new(store.replies()),
        )
    }

    #[tokio::test]
    async fn groups_replies_under_their_comment_in_order() {
        let store = store_with_thread().await;
        for (id, secs) in [("comment-b", 2), ("comment-a", 1)] {
            store
                .insert_comment(Comment {
                    id: id.to_string(),
                    thread_id: "thread-123".to_string(),
                    owner: "user-123".to_string(),
                    content: format!("text {id}"),
                    date: at(secs),
                    is_deleted: false,
                })
                .await;
        }
        for (id, comment_id, secs) in [
            ("reply-3", "comment-a", 9),
            ("reply-1", "comment-b", 3),
            ("reply-2", "comment-a", 4),
        ] {
            store
                .insert_reply(Reply {
                    id: id.to_string(),
                    comment_id: comment_id.to_string(),
                    owner: "user-456".to_string(),
                    content: format!("text {id}"),
                    date: at(secs),
                    is_deleted: false,
                })
                .await;
        }

        let detail = resolver(&store).resolve("thread-123").await.unwrap();

        assert_eq!(detail.username, "dicoding");
        assert_eq!(detail.comments.len(), 2);
        assert_eq!(detail.comments[0].id, "comment-a");
        let a_replies: Vec<&str> = detail.comments[0]
            .replies
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(a_replies, ["reply-2", "reply-3"]);
        assert_eq!(detail.comments[1].replies[0].id, "reply-1");
        assert_eq!(detail.comments[1].replies[0].username, "johndoe");
    }

    #[tokio::test]
    async fn deleted_entities_are_redacted_not_omitted() {
        let store = store_with_thread().await;
        store
            .insert_comment(Comment {
                id: "comment-123".to_string(),
                thread_id: "thread-123".to_string(),
                owner: "user-123".to_string(),
                content: "secret".to_string(),
                date: at(1),
                is_deleted: true,
            })
            .await;
        store
            .insert_reply(Reply {
                id: "reply-123".to_string(),
                comment_id: "comment-123".to_string(),
                owner: "user-456".to_string(),
                content: "also secret".to_string(),
                date: at(2),
                is_deleted: true,
            })
            .await;
        store
            .insert_reply(Reply {
                id: "reply-456".to_string(),
                comment_id: "comment-123".to_string(),
                owner: "user-456".to_string(),
                content: "still here".to_string(),
                date: at(3),
                is_deleted: false,
            })
            .await;

        let detail = resolver(&store).resolve("thread-123").await.unwrap();

        let comment = &detail.comments[0];
        assert!(comment.is_deleted);
        assert_eq!(comment.content, DELETED_COMMENT_CONTENT);
        assert_eq!(comment.username, "dicoding");
        assert_eq!(comment.date, at(1));
        assert_eq!(comment.replies.len(), 2);
        assert_eq!(comment.replies[0].content, DELETED_REPLY_CONTENT);
        assert_eq!(comment.replies[1].content, "still here");
    }

    #[tokio::test]
    async fn unknown_thread_is_not_found() {
        let store = store_with_thread().await;
        let result = resolver(&store).resolve("thread-999").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
