//! Notification endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tower_sessions::Session;

use super::{success, ApiResult};
use crate::auth::{require_role, STAFF};
use crate::errors::AppError;
use crate::models::{Notification, NotifyRequest};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct NotificationCreated {
    pub notification: Notification,
}

/// POST /api/admin/notify - Post a notice at the top of the feed.
pub async fn notify(
    State(state): State<AppState>,
    session: Session,
    request: Result<Json<NotifyRequest>, JsonRejection>,
) -> ApiResult<NotificationCreated> {
    let caller = require_role(&session, STAFF).await?;
    let Json(request) = request?;

    if request.text.trim().is_empty() {
        return Err(AppError::BadRequest("text is required".to_string()));
    }

    let notification = state
        .store
        .update(|doc| Ok(doc.push_notification(request.text)))
        .await?;

    tracing::info!("{} posted notification {}", caller.user_id, notification.id);
    success(NotificationCreated { notification })
}
