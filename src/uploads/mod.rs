//! Upload sink: writes multipart file parts to disk under the public directory.
//!
//! - Materials are staged in `uploads/`, then renamed to
//!   `uploads/<epoch-millis>-<sanitized name>` and linked as `/uploads/<file>`.
//! - Team photos are staged in `team/` and renamed to `team/<roleId>.jpg`,
//!   replacing any previous photo. Bytes are not inspected.
//!
//! A staged file that is never committed must be handed to `discard`.

use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::errors::AppError;

/// URL prefix under which material files are served.
pub const MATERIALS_URL_PREFIX: &str = "/uploads/";

/// Destinations for uploaded files.
#[derive(Debug, Clone)]
pub struct UploadSink {
    materials_dir: PathBuf,
    team_dir: PathBuf,
}

/// An upload written to disk but not yet moved into place.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
}

/// A material file in its final location.
#[derive(Debug)]
pub struct StoredMaterial {
    path: PathBuf,
    pub link: String,
}

impl UploadSink {
    /// Create `uploads/` and `team/` beneath `public_dir`.
    pub async fn init(public_dir: &Path) -> Result<Self, AppError> {
        let sink = Self {
            materials_dir: public_dir.join("uploads"),
            team_dir: public_dir.join("team"),
        };
        tokio::fs::create_dir_all(&sink.materials_dir).await?;
        tokio::fs::create_dir_all(&sink.team_dir).await?;
        Ok(sink)
    }

    pub fn materials_dir(&self) -> &Path {
        &self.materials_dir
    }

    pub fn team_dir(&self) -> &Path {
        &self.team_dir
    }

    /// Final location of the photo for `role_id`.
    pub fn team_photo_path(&self, role_id: &str) -> PathBuf {
        self.team_dir.join(format!("{}.jpg", role_id))
    }

    /// Write a material file to a temporary file inside the materials directory.
    pub async fn stage_material(&self, field: Field<'_>) -> Result<StagedFile, AppError> {
        stage(&self.materials_dir, field).await
    }

    /// Move a staged material to `<epoch-millis>-<sanitized name>`.
    pub async fn commit_material(
        &self,
        staged: StagedFile,
        original_name: &str,
    ) -> Result<StoredMaterial, AppError> {
        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        let path = self.materials_dir.join(&file_name);
        if let Err(e) = tokio::fs::rename(&staged.path, &path).await {
            self.discard(staged).await;
            return Err(e.into());
        }
        tracing::info!("Stored material upload {}", file_name);
        Ok(StoredMaterial {
            path,
            link: format!("{}{}", MATERIALS_URL_PREFIX, file_name),
        })
    }

    /// Remove a committed material that ended up unreferenced.
    pub async fn remove_material(&self, stored: StoredMaterial) {
        remove(&stored.path).await;
    }

    /// Write a photo to a temporary file inside the team directory.
    pub async fn stage_team_photo(&self, field: Field<'_>) -> Result<StagedFile, AppError> {
        stage(&self.team_dir, field).await
    }

    /// Move a staged photo to `<roleId>.jpg`, overwriting any existing photo.
    pub async fn commit_team_photo(
        &self,
        staged: StagedFile,
        role_id: &str,
    ) -> Result<PathBuf, AppError> {
        let target = self.team_photo_path(role_id);
        if let Err(e) = tokio::fs::rename(&staged.path, &target).await {
            self.discard(staged).await;
            return Err(e.into());
        }
        tracing::info!("Team photo for {} replaced", role_id);
        Ok(target)
    }

    /// Remove a staged file that will not be committed.
    pub async fn discard(&self, staged: StagedFile) {
        remove(&staged.path).await;
    }
}

/// Stream `field` into a fresh `.incoming-<uuid>` file in `dir`.
///
/// On failure the partial file is removed.
async fn stage(dir: &Path, field: Field<'_>) -> Result<StagedFile, AppError> {
    let path = dir.join(format!(".incoming-{}", uuid::Uuid::new_v4()));
    match write_field(field, &path).await {
        Ok(written) => {
            tracing::debug!("Staged {} bytes at {:?}", written, path);
            Ok(StagedFile { path })
        }
        Err(e) => {
            remove(&path).await;
            Err(e)
        }
    }
}

async fn remove(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Failed to remove upload {:?}: {}", path, e);
    }
}

/// Stream a multipart field into `dest`, returning the number of bytes written.
async fn write_field(mut field: Field<'_>, dest: &Path) -> Result<u64, AppError> {
    let mut file = tokio::fs::File::create(dest).await?;
    let mut written = 0u64;
    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

/// Strip directory components and collapse each whitespace run into `_`.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let mut out = String::with_capacity(base.len());
    let mut in_whitespace = false;
    for c in base.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    if out.is_empty() || out == "." || out == ".." {
        "upload".to_string()
    } else {
        out
    }
}
