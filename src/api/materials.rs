//! Material endpoint.

use axum::extract::{multipart::MultipartRejection, Multipart, State};
use serde::Serialize;
use tower_sessions::Session;

use super::{success, ApiResult};
use crate::auth::{require_role, STAFF};
use crate::errors::AppError;
use crate::models::{Material, MaterialForm};
use crate::uploads::StagedFile;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MaterialCreated {
    pub material: Material,
}

/// POST /api/admin/add-material - Publish a material (multipart).
///
/// Fields: `title`, `type`, `link`, `file`. An uploaded file wins over `link`.
/// At most one `file` part is accepted.
pub async fn add_material(
    State(state): State<AppState>,
    session: Session,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<MaterialCreated> {
    let caller = require_role(&session, STAFF).await?;

    let (form, upload) = read_material_form(&state, multipart?).await?;

    let stored = match upload {
        Some((staged, file_name)) => Some(state.uploads.commit_material(staged, &file_name).await?),
        None => None,
    };

    let link = stored
        .as_ref()
        .map(|s| s.link.clone())
        .or(form.link.filter(|l| !l.is_empty()));
    let saved = state
        .store
        .update(|doc| {
            Ok(doc.push_material(
                form.title.unwrap_or_default(),
                form.kind.unwrap_or_default(),
                link,
            ))
        })
        .await;

    let material = match saved {
        Ok(material) => material,
        Err(e) => {
            if let Some(stored) = stored {
                state.uploads.remove_material(stored).await;
            }
            return Err(e);
        }
    };

    tracing::info!("{} added material {} ({})", caller.user_id, material.id, material.title);
    success(MaterialCreated { material })
}

/// Collect the text fields, staging the file if one was sent.
async fn read_material_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(MaterialForm, Option<(StagedFile, String)>), AppError> {
    let mut form = MaterialForm::default();
    let mut upload: Option<(StagedFile, String)> = None;

    let result = async {
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(field.text().await?),
                "type" => form.kind = Some(field.text().await?),
                "link" => form.link = Some(field.text().await?),
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    // Browsers send an empty part when no file was chosen
                    if file_name.is_empty() {
                        continue;
                    }
                    if upload.is_some() {
                        return Err(AppError::BadRequest(
                            "Only one file may be attached".to_string(),
                        ));
                    }
                    let staged = state.uploads.stage_material(field).await?;
                    upload = Some((staged, file_name));
                }
                _ => {}
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    match result {
        Ok(()) => Ok((form, upload)),
        Err(e) => {
            if let Some((staged, _)) = upload {
                state.uploads.discard(staged).await;
            }
            Err(e)
        }
    }
}
