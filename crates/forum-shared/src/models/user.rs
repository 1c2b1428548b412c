use serde::{Deserialize, Serialize};

/// Forum member. Rows are written by the authentication service; the forum
/// only reads them to resolve display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub fullname: String,
}
