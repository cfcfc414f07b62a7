//! Team roster endpoints.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use tower_sessions::Session;

use super::{success, ApiResult};
use crate::auth::{require_role, SUPERADMIN};
use crate::errors::AppError;
use crate::models::{is_valid_role_id, Team, TeamEntry, TeamMemberForm};
use crate::uploads::StagedFile;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpdate {
    pub role_id: String,
    pub member: Option<TeamEntry>,
    pub photo_updated: bool,
}

/// GET /api/team - Public roster, returned verbatim.
pub async fn get_team(State(state): State<AppState>) -> Result<Json<Team>, AppError> {
    let document = state.store.load().await?;
    Ok(Json(document.team))
}

/// POST /api/superadmin/update-team-member - Upsert name/tag and optionally replace the photo.
///
/// Fields: `roleId`, `memberName`, `memberTag`, `photo`.
pub async fn update_team_member(
    State(state): State<AppState>,
    session: Session,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<TeamUpdate> {
    let caller = require_role(&session, SUPERADMIN).await?;

    let (form, photo) = read_team_form(&state, multipart?).await?;

    let role_id = match form.role_id.as_deref() {
        Some(id) if is_valid_role_id(id) => id.to_string(),
        other => {
            if let Some(staged) = photo {
                state.uploads.discard(staged).await;
            }
            let message = if other.unwrap_or_default().is_empty() {
                "roleId is required"
            } else {
                "roleId is not a valid name"
            };
            return Err(AppError::BadRequest(message.to_string()));
        }
    };

    let saved = state
        .store
        .update(|doc| Ok(form.apply(&role_id, &mut doc.team)))
        .await;
    let member = match saved {
        Ok(member) => member,
        Err(e) => {
            if let Some(staged) = photo {
                state.uploads.discard(staged).await;
            }
            return Err(e);
        }
    };

    let photo_updated = match photo {
        Some(staged) => {
            state.uploads.commit_team_photo(staged, &role_id).await?;
            true
        }
        None => false,
    };

    tracing::info!(
        "{} updated team member {} (photo: {})",
        caller.user_id,
        role_id,
        photo_updated
    );
    success(TeamUpdate {
        role_id,
        member,
        photo_updated,
    })
}

/// Collect the text fields, staging the photo if one was sent.
async fn read_team_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(TeamMemberForm, Option<StagedFile>), AppError> {
    let mut form = TeamMemberForm::default();
    let mut photo: Option<StagedFile> = None;

    let result = async {
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "roleId" => form.role_id = Some(field.text().await?.trim().to_string()),
                "memberName" => form.member_name = Some(field.text().await?),
                "memberTag" => form.member_tag = Some(field.text().await?),
                "photo" => {
                    let has_file = field.file_name().is_some_and(|n| !n.is_empty());
                    if has_file {
                        let staged = state.uploads.stage_team_photo(field).await?;
                        if let Some(previous) = photo.replace(staged) {
                            state.uploads.discard(previous).await;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    match result {
        Ok(()) => Ok((form, photo)),
        Err(e) => {
            if let Some(staged) = photo {
                state.uploads.discard(staged).await;
            }
            Err(e)
        }
    }
}
