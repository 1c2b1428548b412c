use std::sync::Arc;

use forum_shared::AddedThread;

use crate::error::AppError;
use crate::repository::ThreadRepository;

#[derive(Debug, Clone)]
pub struct AddThread {
    pub owner: String,
    pub title: String,
    pub body: String,
}

pub struct AddThreadHandler {
    threads: Arc<dyn ThreadRepository>,
}

impl AddThreadHandler {
    pub fn new(threads: Arc<dyn ThreadRepository>) -> Self {
        Self { threads }
    }

    pub async fn execute(&self, cmd: &AddThread) -> Result<AddedThread, AppError> {
        let added = self
            .threads
            .add_thread(&cmd.owner, &cmd.title, &cmd.body)
            .await?;

        tracing::debug!(thread_id = %added.id, owner = %added.owner, "thread created");
        Ok(added)
    }
}
