mod comments;
mod replies;
mod threads;

pub use comments::*;
pub use replies::*;
pub use threads::*;

use serde::{Deserialize, Serialize};

/// Envelope wrapping every successful response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn empty() -> Self {
        Self {
            status: "success".to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AddedComment;

    #[test]
    fn success_envelope_uses_camel_case_payload_keys() {
        let body = ApiResponse::success(AddedCommentResponse {
            added_comment: AddedComment {
                id: "comment-123".to_string(),
                content: "hello".to_string(),
                owner: "user-123".to_string(),
            },
        });

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["addedComment"]["id"], "comment-123");
    }

    #[test]
    fn empty_envelope_omits_data() {
        let value = serde_json::to_value(ApiResponse::<()>::empty()).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "success" }));
    }
}
