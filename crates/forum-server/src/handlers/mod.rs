pub mod comments;
pub mod replies;
pub mod threads;

use crate::error::AppError;

/// Rejects blank text fields before they reach a command.
fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
