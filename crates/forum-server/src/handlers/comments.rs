use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use forum_shared::api::{AddedCommentResponse, ApiResponse, CreateCommentRequest};

use super::require_text;
use crate::auth::AuthUser;
use crate::commands::{AddComment, AddCommentHandler, DeleteComment, DeleteCommentHandler};
use crate::error::AppError;
use crate::routes::AppState;

/// POST /threads/:thread_id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(thread_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddedCommentResponse>>), AppError> {
    require_text("Comment content", &req.content)?;

    let handler =
        AddCommentHandler::new(state.repos.threads.clone(), state.repos.comments.clone());
    let added_comment = handler
        .execute(&AddComment {
            thread_id,
            owner: user.id,
            content: req.content,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AddedCommentResponse { added_comment })),
    ))
}

/// DELETE /threads/:thread_id/comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((thread_id, comment_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    DeleteCommentHandler::new(state.repos.comments.clone())
        .execute(&DeleteComment {
            comment_id,
            thread_id,
            user_id: user.id,
        })
        .await?;

    Ok(Json(ApiResponse::empty()))
}
