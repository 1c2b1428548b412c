use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use forum_shared::{AddedThread, ThreadWithAuthor};

use crate::db::DbPool;
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::repository::{ThreadRepository, THREAD_NOT_FOUND};

pub struct PgThreadRepository {
    pool: DbPool,
    ids: Arc<dyn IdGenerator>,
}

impl PgThreadRepository {
    pub fn new(pool: DbPool, ids: Arc<dyn IdGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    async fn add_thread(
        &self,
        owner: &str,
        title: &str,
        body: &str,
    ) -> Result<AddedThread, AppError> {
        let id = format!("thread-{}", self.ids.generate());

        let added: AddedThread = sqlx::query_as(
            r#"
            INSERT INTO threads (id, title, body, owner, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, owner
            "#,
        )
        .bind(&id)
        .bind(title)
        .bind(body)
        .bind(owner)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(added)
    }

    async fn verify_available_thread(&self, thread_id: &str) -> Result<(), AppError> {
        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM threads WHERE id = $1")
            .bind(thread_id)
            .fetch_optional(&self.pool)
            .await?;

        if exists.is_none() {
            return Err(AppError::not_found(THREAD_NOT_FOUND));
        }
        Ok(())
    }

    async fn get_thread_by_id(&self, thread_id: &str) -> Result<ThreadWithAuthor, AppError> {
        let thread: Option<ThreadWithAuthor> = sqlx::query_as(
            r#"
            SELECT t.id, t.title, t.body, t.date, u.username
            FROM threads t
            JOIN users u ON u.id = t.owner
            WHERE t.id = $1
            "#,
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;

        thread.ok_or_else(|| AppError::not_found(THREAD_NOT_FOUND))
    }
}
