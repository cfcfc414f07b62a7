//! Persistence module.
//!
//! A single JSON document on disk is the source of truth for users, notifications,
//! materials and team text.

mod store;

pub use store::*;

use crate::errors::AppError;

/// Create the store, making sure the document's directory and the document itself exist.
pub async fn init_store(store: JsonStore) -> Result<JsonStore, AppError> {
    if let Some(parent) = store.path().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let document = store.load().await?;
    tracing::info!(
        "Document loaded: {} users, {} notifications, {} materials, {} team entries",
        document.users.len(),
        document.notifications.len(),
        document.materials.len(),
        document.team.len()
    );

    Ok(store)
}
