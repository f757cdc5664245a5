use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid transition: '{from}' -> '{to}'")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Publication was refused; carries every failing check so the
    /// author can fix the trip in a single editing pass.
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// The conditional status write lost against a concurrent writer.
    /// Callers retry from a fresh read; the core never retries itself.
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
