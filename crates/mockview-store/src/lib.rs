//! mockview-store: Session store backends.
//!
//! Implements the `SessionStore` trait for an in-process map and for JSON
//! files on disk, and loads the configuration that selects between them.

pub mod config;
pub mod file;
pub mod memory;

pub use config::{
    build_engine, create_store, load_config_from, MockviewConfig, StoreConfig,
};
pub use file::FileStore;
pub use memory::MemoryStore;

use mockview_core::error::StoreError;
use mockview_core::traits::{Document, ID_FIELD};

/// The `_id` of a document about to be written.
pub(crate) fn document_id(document: &Document) -> Result<&str, StoreError> {
    document
        .get(ID_FIELD)
        .and_then(|id| id.as_str())
        .ok_or_else(|| StoreError::Backend(format!("document has no string {ID_FIELD}")))
}

/// Replace the document with the same `_id`, or append.
pub(crate) fn upsert(documents: &mut Vec<Document>, document: Document, id: &str) {
    match documents
        .iter_mut()
        .find(|d| d.get(ID_FIELD).and_then(|v| v.as_str()) == Some(id))
    {
        Some(existing) => *existing = document,
        None => documents.push(document),
    }
}

/// Whether a document's top-level `field` is the string `value`.
pub(crate) fn field_matches(document: &Document, field: &str, value: &str) -> bool {
    document.get(field).and_then(|v| v.as_str()) == Some(value)
}
