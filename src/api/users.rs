//! User management endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use tower_sessions::Session;

use super::{success, ApiResult};
use crate::auth::password::hash_password;
use crate::auth::{require_role, STAFF, SUPERADMIN};
use crate::errors::AppError;
use crate::models::{now_timestamp, AddUserRequest, Role, User, UserView};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UserCreated {
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct UserDeleted {
    pub removed: bool,
}

/// POST /api/admin/add-user - Create an account.
///
/// Admins can only create members; superadmins can also create admins.
pub async fn add_user(
    State(state): State<AppState>,
    session: Session,
    request: Result<Json<AddUserRequest>, JsonRejection>,
) -> ApiResult<UserCreated> {
    let caller = require_role(&session, STAFF).await?;
    let Json(request) = request?;

    // Stored exactly as sent; only an all-blank name is refused
    let username = request.new_username;
    if username.trim().is_empty() {
        return Err(AppError::BadRequest("newUsername is required".to_string()));
    }
    if request.new_password.is_empty() {
        return Err(AppError::BadRequest("newPassword is required".to_string()));
    }

    let role = Role::resolve_new(caller.role, request.new_role.as_deref());
    let password_hash = hash_password(&request.new_password)?;

    let user = state
        .store
        .update(|doc| {
            if doc.find_user(&username).is_some() {
                return Err(AppError::BadRequest("Exists".to_string()));
            }
            let user = User {
                username: username.clone(),
                password_hash,
                role,
                created_at: now_timestamp(),
            };
            let view = UserView::from(&user);
            doc.users.push(user);
            Ok(view)
        })
        .await?;

    tracing::info!("{} created user {} ({})", caller.user_id, user.username, user.role);
    success(UserCreated { user })
}

/// DELETE /api/admin/delete-user/{username} - Remove an account.
///
/// The bootstrap superadmin can never be removed.
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(username): Path<String>,
) -> ApiResult<UserDeleted> {
    let caller = require_role(&session, SUPERADMIN).await?;

    if username == state.store.bootstrap_username() {
        return Err(AppError::BadRequest(
            "The bootstrap superadmin cannot be deleted".to_string(),
        ));
    }

    let removed = state.store.update(|doc| Ok(doc.remove_user(&username))).await?;

    if removed {
        tracing::info!("{} deleted user {}", caller.user_id, username);
    }
    success(UserDeleted { removed })
}
