//! Capability traits the session engine is assembled from.
//!
//! The store trait is async and implemented by the `mockview-store` crate.
//! Scoring and aggregation are pure and synchronous.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Feedback, Response, Session, VoiceFeedback};
use crate::report::{FinalReport, RoundSummary};

/// A stored document: a JSON object carrying its key in `_id`.
pub type Document = serde_json::Value;

/// Field holding a document's key.
pub const ID_FIELD: &str = "_id";

/// Collection holding session documents.
pub const SESSIONS: &str = "session";
/// Collection holding submitted responses.
pub const RESPONSES: &str = "response";
/// Collection holding payment receipts.
pub const PAYMENTS: &str = "payment";

// ---------------------------------------------------------------------------
// Session store
// ---------------------------------------------------------------------------

/// Key-value persistence for session documents and responses.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Human-readable backend name (e.g. "file").
    fn name(&self) -> &str;

    /// Whether a real backend sits behind this store.
    fn is_configured(&self) -> bool {
        true
    }

    /// Insert or replace a document, keyed by its `_id`.
    async fn put(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Fetch a document by key. `Ok(None)` means the store has no such document.
    ///
    /// Unlike writes, reads are not no-ops without a backend: [`NullStore`]
    /// answers `get` and `find` with [`StoreError::Unconfigured`].
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// All documents whose top-level string `field` equals `value`.
    ///
    /// Order is backend-defined; callers that need one sort the result.
    async fn find(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;

    /// Names of the collections holding at least one document.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;
}

/// Store used when persistence is not configured.
///
/// Writes and listings succeed and do nothing. Reads report
/// [`StoreError::Unconfigured`] so the engine knows it cannot verify
/// anything and runs ephemerally.
pub struct NullStore;

#[async_trait]
impl SessionStore for NullStore {
    fn name(&self) -> &str {
        "none"
    }

    fn is_configured(&self) -> bool {
        false
    }

    async fn put(&self, _: &str, _: Document) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get(&self, _: &str, _: &str) -> Result<Option<Document>, StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn find(&self, _: &str, _: &str, _: &str) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Unconfigured)
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Scoring and aggregation
// ---------------------------------------------------------------------------

/// Turns a text answer into feedback.
pub trait AnswerScorer: Send + Sync {
    fn score(&self, answer: &str) -> Feedback;
}

/// Turns a recorded answer into delivery signals.
pub trait VoiceAnalyzer: Send + Sync {
    fn analyze(&self, audio: &[u8]) -> VoiceFeedback;
}

/// Builds summaries and reports for a session.
///
/// `session` is `None` when the engine is running without a reachable store.
pub trait ReportAggregator: Send + Sync {
    fn round_summary(&self, session: Option<&Session>, responses: &[Response]) -> RoundSummary;

    fn final_report(&self, session: Option<&Session>, responses: &[Response]) -> FinalReport;
}
