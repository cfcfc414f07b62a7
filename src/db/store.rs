//! JSON file store.
//!
//! The whole document is read on every `load` and rewritten on every `save`; nothing
//! is cached between requests.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::auth::password::hash_password;
use crate::errors::AppError;
use crate::models::Document;

/// Credentials seeded into a fresh document.
#[derive(Debug, Clone)]
pub struct BootstrapAccount {
    pub username: String,
    pub password: String,
}

/// File-backed store for the [`Document`].
pub struct JsonStore {
    path: PathBuf,
    bootstrap: BootstrapAccount,
    /// Serializes load → mutate → save cycles made through [`JsonStore::update`].
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>, bootstrap: BootstrapAccount) -> Self {
        Self {
            path: path.into(),
            bootstrap,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Username of the undeletable superadmin.
    pub fn bootstrap_username(&self) -> &str {
        &self.bootstrap.username
    }

    /// Read the current document, creating and persisting the bootstrap document
    /// when the file does not exist yet.
    ///
    /// Seeding happens under the write lock, so it never overwrites a document
    /// written by a concurrent [`JsonStore::update`].
    pub async fn load(&self) -> Result<Document, AppError> {
        if let Some(document) = self.read().await? {
            return Ok(document);
        }
        let _guard = self.write_lock.lock().await;
        self.read_or_seed().await
    }

    /// `None` when the file does not exist.
    async fn read(&self) -> Result<Option<Document>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                tracing::error!("Persisted document {:?} is unreadable: {}", self.path, e);
                AppError::Storage(format!("Persisted document is unreadable: {}", e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Caller must hold the write lock.
    async fn read_or_seed(&self) -> Result<Document, AppError> {
        if let Some(document) = self.read().await? {
            return Ok(document);
        }
        tracing::info!(
            "No document at {:?}, seeding superadmin {}",
            self.path,
            self.bootstrap.username
        );
        let document = Document::bootstrap(
            &self.bootstrap.username,
            hash_password(&self.bootstrap.password)?,
        );
        self.save(&document).await?;
        Ok(document)
    }

    /// Overwrite the persisted document.
    ///
    /// Writes a uniquely named sibling temp file and renames it into place, so
    /// readers never see a partially written document and concurrent saves never
    /// share a temp file.
    pub async fn save(&self, document: &Document) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| AppError::Internal(format!("Failed to serialize document: {}", e)))?;

        let tmp_path = self
            .path
            .with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&tmp_path, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            tokio::fs::remove_file(&tmp_path).await.ok();
            return Err(e.into());
        }
        Ok(())
    }

    /// Load, apply `mutate`, and save, holding the write lock throughout.
    ///
    /// If `mutate` fails nothing is written.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Document) -> Result<T, AppError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_or_seed().await?;
        let output = mutate(&mut document)?;
        self.save(&document).await?;
        Ok(output)
    }
}
