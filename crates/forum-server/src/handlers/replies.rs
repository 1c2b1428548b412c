use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use forum_shared::api::{AddedReplyResponse, ApiResponse, CreateReplyRequest};

use super::require_text;
use crate::auth::AuthUser;
use crate::commands::{AddReply, AddReplyHandler, DeleteReply, DeleteReplyHandler};
use crate::error::AppError;
use crate::routes::AppState;

/// POST /threads/:thread_id/comments/:comment_id/replies
pub async fn create_reply(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    Json(req): Json<CreateReplyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddedReplyResponse>>), AppError> {
    require_text("Reply content", &req.content)?;

    let repos = &state.repos;
    let handler = AddReplyHandler::new(
        repos.threads.clone(),
        repos.comments.clone(),
        repos.replies.clone(),
    );
    let added_reply = handler
        .execute(&AddReply {
            thread_id,
            comment_id,
            owner: user.id,
            content: req.content,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AddedReplyResponse { added_reply })),
    ))
}

/// DELETE /threads/:thread_id/comments/:comment_id/replies/:reply_id
pub async fn delete_reply(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((thread_id, comment_id, reply_id)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    DeleteReplyHandler::new(state.repos.replies.clone())
        .execute(&DeleteReply {
            reply_id,
            comment_id,
            thread_id,
            user_id: user.id,
        })
        .await?;

    Ok(Json(ApiResponse::empty()))
}
