use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use forum_shared::api::{AddedThreadResponse, ApiResponse, CreateThreadRequest, ThreadResponse};

use super::require_text;
use crate::auth::AuthUser;
use crate::commands::{AddThread, AddThreadHandler};
use crate::error::AppError;
use crate::resolver::ThreadDetailResolver;
use crate::routes::AppState;

/// POST /threads
pub async fn create_thread(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddedThreadResponse>>), AppError> {
    require_text("Thread title", &req.title)?;
    require_text("Thread body", &req.body)?;

    let added_thread = AddThreadHandler::new(state.repos.threads.clone())
        .execute(&AddThread {
            owner: user.id,
            title: req.title,
            body: req.body,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AddedThreadResponse { added_thread })),
    ))
}

/// GET /threads/:thread_id
pub async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<Json<ApiResponse<ThreadResponse>>, AppError> {
    let repos = &state.repos;
    let thread = ThreadDetailResolver::new(
        repos.threads.clone(),
        repos.comments.clone(),
        repos.replies.clone(),
    )
    .resolve(&thread_id)
    .await?;

    Ok(Json(ApiResponse::success(ThreadResponse { thread })))
}
