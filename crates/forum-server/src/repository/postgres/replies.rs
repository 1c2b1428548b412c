use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forum_shared::{AddedReply, ReplyWithAuthor};

use crate::db::DbPool;
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::repository::{ReplyRepository, ACCESS_DENIED, REPLY_NOT_FOUND};

pub struct PgReplyRepository {
    pool: DbPool,
    ids: Arc<dyn IdGenerator>,
}

impl PgReplyRepository {
    pub fn new(pool: DbPool, ids: Arc<dyn IdGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl ReplyRepository for PgReplyRepository {
    async fn add_reply(
        &self,
        content: &str,
        comment_id: &str,
        owner: &str,
    ) -> Result<AddedReply, AppError> {
        let id = format!("reply-{}", self.ids.generate());

        let added: AddedReply = sqlx::query_as(
            r#"
            INSERT INTO replies (id, comment_id, owner, content, date, is_deleted)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING id, content, owner
            "#,
        )
        .bind(&id)
        .bind(comment_id)
        .bind(owner)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(added)
    }

    async fn verify_reply_owner(&self, reply_id: &str, user_id: &str) -> Result<(), AppError> {
        let owned: Option<(String,)> =
            sqlx::query_as("SELECT id FROM replies WHERE id = $1 AND owner = $2")
                .bind(reply_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        if owned.is_none() {
            return Err(AppError::forbidden(ACCESS_DENIED));
        }
        Ok(())
    }

    async fn delete_reply_by_id(&self, reply_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE replies SET is_deleted = TRUE WHERE id = $1")
            .bind(reply_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(REPLY_NOT_FOUND));
        }
        Ok(())
    }

    async fn get_replies_by_thread_id(
        &self,
        thread_id: &str,
    ) -> Result<Vec<ReplyWithAuthor>, AppError> {
        // c.id breaks ties between comments posted at the same instant so
        // replies never interleave across comments.
        let replies: Vec<ReplyWithAuthor> = sqlx::query_as(
            r#"
            SELECT r.id, r.comment_id, u.username, r.date, r.content, r.is_deleted
            FROM replies r
            JOIN users u ON u.id = r.owner
            JOIN comments c ON c.id = r.comment_id
            WHERE c.thread_id = $1
            ORDER BY c.date ASC, c.id ASC, r.date ASC
            "#,
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(replies)
    }

    async fn verify_available_reply(
        &self,
        reply_id: &str,
        comment_id: &str,
        thread_id: &str,
    ) -> Result<(), AppError> {
        let exists: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT r.id
            FROM replies r
            JOIN comments c ON c.id = r.comment_id
            WHERE r.id = $1
              AND r.comment_id = $2
              AND c.thread_id = $3
              AND r.is_deleted = FALSE
              AND c.is_deleted = FALSE
            "#,
        )
        .bind(reply_id)
        .bind(comment_id)
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;

        if exists.is_none() {
            return Err(AppError::not_found(REPLY_NOT_FOUND));
        }
        Ok(())
    }
}
