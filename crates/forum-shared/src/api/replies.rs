use serde::{Deserialize, Serialize};

use crate::models::AddedReply;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateReplyRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedReplyResponse {
    pub added_reply: AddedReply,
}
