use serde::{Deserialize, Serialize};

use crate::models::AddedComment;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedCommentResponse {
    pub added_comment: AddedComment,
}
