use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forum_shared::{AddedComment, CommentWithAuthor};

use crate::db::DbPool;
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::repository::{
    CommentRepository, ACCESS_DENIED, COMMENT_NOT_FOUND, COMMENT_NOT_IN_THREAD,
};

pub struct PgCommentRepository {
    pool: DbPool,
    ids: Arc<dyn IdGenerator>,
}

impl PgCommentRepository {
    pub fn new(pool: DbPool, ids: Arc<dyn IdGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn add_comment(
        &self,
        thread_id: &str,
        owner: &str,
        content: &str,
    ) -> Result<AddedComment, AppError> {
        let id = format!("comment-{}", self.ids.generate());

        let added: AddedComment = sqlx::query_as(
            r#"
            INSERT INTO comments (id, thread_id, owner, content, date, is_deleted)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING id, content, owner
            "#,
        )
        .bind(&id)
        .bind(thread_id)
        .bind(owner)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(added)
    }

    async fn verify_available_comment_in_thread(
        &self,
        comment_id: &str,
        thread_id: &str,
    ) -> Result<(), AppError> {
        let exists: Option<(String,)> = sqlx::query_as(
            "SELECT id FROM comments WHERE id = $1 AND thread_id = $2 AND is_deleted = FALSE",
        )
        .bind(comment_id)
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;

        if exists.is_none() {
            return Err(AppError::not_found(COMMENT_NOT_IN_THREAD));
        }
        Ok(())
    }

    async fn verify_comment_owner(&self, comment_id: &str, user_id: &str) -> Result<(), AppError> {
        // No is_deleted filter: the owner of a deleted comment is still its owner.
        let owned: Option<(String,)> =
            sqlx::query_as("SELECT id FROM comments WHERE id = $1 AND owner = $2")
                .bind(comment_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        if owned.is_none() {
            return Err(AppError::forbidden(ACCESS_DENIED));
        }
        Ok(())
    }

    async fn delete_comment_by_id(&self, comment_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE comments SET is_deleted = TRUE WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(COMMENT_NOT_FOUND));
        }
        Ok(())
    }

    async fn get_comments_by_thread_id(
        &self,
        thread_id: &str,
    ) -> Result<Vec<CommentWithAuthor>, AppError> {
        let comments: Vec<CommentWithAuthor> = sqlx::query_as(
            r#"
            SELECT c.id, u.username, c.date, c.content, c.is_deleted
            FROM comments c
            JOIN users u ON u.id = c.owner
            WHERE c.thread_id = $1
            ORDER BY c.date ASC, c.id ASC
            "#,
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
