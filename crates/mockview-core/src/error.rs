//! Engine and store error types.
//!
//! `StoreError` lives here rather than in `mockview-store` so the engine can
//! classify persistence failures without string matching.

use thiserror::Error;

/// Errors returned by a [`SessionStore`](crate::traits::SessionStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No persistence backend is configured.
    #[error("store not configured")]
    Unconfigured,

    /// Filesystem or socket failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored collection is not in the expected shape.
    #[error("collection '{collection}' is corrupt: {message}")]
    Corrupt { collection: String, message: String },

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns `true` when the failure only means "nothing is configured",
    /// which is an expected deployment mode rather than an outage.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, StoreError::Unconfigured)
    }
}

/// Errors surfaced to callers of the session engine.
///
/// Store outages never appear here: the engine logs them and degrades to
/// ephemeral behaviour instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A malformed enumeration value or a missing required field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The store answered and has no session with this identifier.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The question was never issued to the session it is answered in.
    #[error("question {question_id} was not issued to session {session_id}")]
    QuestionNotIssued {
        session_id: String,
        question_id: String,
    },
}

impl EngineError {
    /// Returns `true` for rejected input.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }

    /// Returns `true` when a referenced session or question does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::SessionNotFound(_) | EngineError::QuestionNotIssued { .. }
        )
    }
}
