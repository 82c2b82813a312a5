//! JSON file store.
//!
//! Each collection is a directory and each document one `<id>.json` file
//! inside it. A write goes to a uniquely named temp file in the collection
//! directory and is renamed over the document, so concurrent writers (in
//! this process or another) never touch each other's documents and the same
//! document is last-write-wins.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use mockview_core::error::StoreError;
use mockview_core::traits::{Document, SessionStore};

use crate::{document_id, field_matches};

const EXTENSION: &str = "json";

/// Stores documents as JSON files under a directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, StoreError> {
        Ok(self.root.join(checked_name("collection", collection)?))
    }

    fn document_path(dir: &Path, id: &str) -> Result<PathBuf, StoreError> {
        Ok(dir.join(format!("{}.{EXTENSION}", checked_name("document id", id)?)))
    }
}

/// Names become path components, so only `[A-Za-z0-9_-]` is accepted.
fn checked_name<'a>(kind: &str, name: &'a str) -> Result<&'a str, StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(name)
    } else {
        Err(StoreError::Backend(format!("invalid {kind}: '{name}'")))
    }
}

fn is_document(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(EXTENSION)
}

async fn read_document(collection: &str, path: &Path) -> Result<Option<Document>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let document: Document = serde_json::from_slice(&bytes)?;
    if !document.is_object() {
        return Err(StoreError::Corrupt {
            collection: collection.to_string(),
            message: format!("{} does not hold a JSON object", path.display()),
        });
    }
    Ok(Some(document))
}

fn write_atomically(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

async fn has_documents(dir: &Path) -> Result<bool, StoreError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if is_document(&entry.path()) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[async_trait]
impl SessionStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn put(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let id = document_id(&document)?.to_string();
        let dir = self.collection_dir(collection)?;
        let path = Self::document_path(&dir, &id)?;
        let json = serde_json::to_vec_pretty(&document)?;

        tokio::task::spawn_blocking(move || write_atomically(&dir, &path, &json))
            .await
            .map_err(|e| StoreError::Backend(format!("write task failed: {e}")))??;

        tracing::trace!(collection, id, "document written");
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let dir = self.collection_dir(collection)?;
        read_document(collection, &Self::document_path(&dir, id)?).await
    }

    async fn find(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let dir = self.collection_dir(collection)?;
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_document(&path) {
                continue;
            }
            if let Some(document) = read_document(collection, &path).await? {
                if field_matches(&document, field, value) {
                    found.push(document);
                }
            }
        }
        Ok(found)
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if checked_name("collection", &name).is_ok() && has_documents(&entry.path()).await? {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
