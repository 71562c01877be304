//! Content store - the site content document on disk.
//!
//! This service handles:
//! - Reading and parsing the whole document
//! - Writing the whole document back
//! - Read-modify-write cycles for the section editors
//!
//! # Durability
//!
//! Every write goes to a temporary file next to the target and is renamed
//! over it, so readers see either the old or the new document, never a
//! partial one.
//!
//! # Concurrency
//!
//! All writes through one store are serialized by an async mutex, and
//! `update` holds that mutex across its read, mutation and write. A caller
//! that does `read` and later `write` on its own is NOT protected: if two
//! callers both read the same document, the later write replaces the
//! earlier one in full, including sections it never touched. That is the
//! contract of `POST /api/admin/content`, which takes a whole document.
//! There is no locking across processes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, StorageError};
use crate::models::content::ContentDocument;

#[derive(Debug, Clone)]
pub struct ContentStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl ContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document.
    ///
    /// # Errors
    ///
    /// - `Missing`: the file does not exist
    /// - `Read`: any other I/O failure
    /// - `Malformed`: the file is not a valid content document
    pub async fn read(&self) -> Result<ContentDocument, StorageError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::Missing
            } else {
                StorageError::Read(e)
            }
        })?;
        serde_json::from_slice(&raw).map_err(StorageError::Malformed)
    }

    /// Replace the whole document.
    pub async fn write(&self, document: &ContentDocument) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.replace_file(document).await
    }

    /// Run a read-modify-write cycle that no other write through this store
    /// can interleave with.
    ///
    /// `mutate` runs on the freshly read document. If it returns an error,
    /// nothing is written.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut ContentDocument) -> Result<T, AppError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;
        let output = mutate(&mut document)?;
        self.replace_file(&document).await?;
        Ok(output)
    }

    async fn replace_file(&self, document: &ContentDocument) -> Result<(), StorageError> {
        let mut body = serde_json::to_vec_pretty(document).map_err(StorageError::Serialize)?;
        body.push(b'\n');

        let tmp = self.temp_path();
        if let Err(e) = tokio::fs::write(&tmp, &body).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StorageError::Write(e));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StorageError::Write(e));
        }

        tracing::debug!(path = %self.path.display(), bytes = body.len(), "content document written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "content".to_string());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::Event;
    use serde_json::{Value, json};

    fn sample() -> Value {
        json!({
            "hero": {
                "title": "DJ Nova",
                "subtitle": "House and techno",
                "backgroundImage": "/uploads/hero.jpg"
            },
            "about": { "title": "About", "bio": "Born in Lisbon." },
            "contact": {
                "email": "booking@example.com",
                "phone": "+1 555 0100",
                "address": "",
                "management": "Mgmt Co",
                "social": { "spotify": "https://open.spotify.com/artist/x", "instagram": "",
                            "youtube": "", "twitter": "", "facebook": "", "tiktok": "" }
            },
            "businessServices": [
                { "title": "Club Nights", "description": "Residencies", "icon": "Music",
                  "color": "purple", "features": ["4h sets", "Own gear"] }
            ],
            "events": [
                { "id": "1", "title": "Opening", "date": "2025-05-01", "description": "Season opener" }
            ],
            "sponsors": []
        })
    }

    async fn store_with(value: &Value) -> (tempfile::TempDir, ContentStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site-content.json");
        tokio::fs::write(&path, serde_json::to_vec_pretty(value).unwrap())
            .await
            .unwrap();
        (dir, ContentStore::new(path))
    }

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            date: "2025-06-01".to_string(),
            description: "Night".to_string(),
            ..Event::default()
        }
    }

    #[tokio::test]
    async fn write_of_read_preserves_all_values() {
        let original = sample();
        let (_dir, store) = store_with(&original).await;

        let doc = store.read().await.unwrap();
        store.write(&doc).await.unwrap();

        let raw = tokio::fs::read(store.path()).await.unwrap();
        let rewritten: Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(rewritten, original);
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("nope.json"));
        assert!(matches!(store.read().await, Err(StorageError::Missing)));
    }

    #[tokio::test]
    async fn malformed_file_is_not_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site-content.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();
        let store = ContentStore::new(&path);

        assert!(matches!(store.read().await, Err(StorageError::Malformed(_))));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path().join("absent").join("site-content.json"));
        let result = store.write(&ContentDocument::default()).await;
        assert!(matches!(result, Err(StorageError::Write(_))));
    }

    #[tokio::test]
    async fn write_leaves_no_temp_files() {
        let (dir, store) = store_with(&sample()).await;
        let doc = store.read().await.unwrap();
        store.write(&doc).await.unwrap();

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["site-content.json".to_string()]);
    }

    #[tokio::test]
    async fn unlocked_read_then_write_loses_the_earlier_writer() {
        let (_dir, store) = store_with(&sample()).await;

        // Both editors start from the same document.
        let mut editor_a = store.read().await.unwrap();
        let mut editor_b = store.read().await.unwrap();

        editor_a.hero.title = "Changed by A".to_string();
        editor_b.events.push(event("2"));

        store.write(&editor_a).await.unwrap();
        store.write(&editor_b).await.unwrap();

        let last = store.read().await.unwrap();
        assert_eq!(last.events.len(), 2);
        // A's change to an unrelated section is gone.
        assert_eq!(last.hero.title, "DJ Nova");
    }

    #[tokio::test]
    async fn concurrent_updates_are_all_kept() {
        let (_dir, store) = store_with(&sample()).await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update(|doc| {
                        doc.events.push(event(&format!("concurrent-{i}")));
                        Ok(())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let doc = store.read().await.unwrap();
        assert_eq!(doc.events.len(), 17);
    }

    #[tokio::test]
    async fn failed_mutation_writes_nothing() {
        let (_dir, store) = store_with(&sample()).await;
        let before = tokio::fs::read(store.path()).await.unwrap();

        let result: Result<(), AppError> = store
            .update(|doc| {
                doc.events.clear();
                Err(AppError::Validation("nope".to_string()))
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(tokio::fs::read(store.path()).await.unwrap(), before);
    }
}
