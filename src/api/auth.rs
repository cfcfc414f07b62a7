//! Login and logout endpoints.

use axum::{extract::State, Json};
use serde::Serialize;
use tower_sessions::Session;

use super::{success, Ack, ApiResult};
use crate::auth::password::{hash_password, verify_password, Verification};
use crate::auth::{AuthSession, SessionUser};
use crate::errors::AppError;
use crate::models::{LoginRequest, Role};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub role: Role,
}

/// POST /api/login - Verify credentials and establish a session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let document = state.store.load().await?;

    let Some(user) = document.find_user(&request.username) else {
        tracing::warn!("Login failed for unknown user {:?}", request.username);
        return Err(AppError::Unauthorized("Access Denied".to_string()));
    };

    let verification = verify_password(&request.password, &user.password_hash);
    if !verification.is_match() {
        tracing::warn!("Login failed for {}: wrong password", user.username);
        return Err(AppError::Unauthorized("Access Denied".to_string()));
    }

    if verification == Verification::LegacyMatch {
        let hash = hash_password(&request.password)?;
        let username = user.username.clone();
        state
            .store
            .update(|doc| {
                if let Some(stored) = doc.find_user_mut(&username) {
                    stored.password_hash = hash;
                }
                Ok(())
            })
            .await?;
        tracing::info!("Upgraded plaintext credential for {}", username);
    }

    let session_user = SessionUser {
        user_id: user.username.clone(),
        role: user.role,
    };
    AuthSession::new(&session).login(&session_user).await?;

    tracing::info!("User {} logged in as {}", session_user.user_id, session_user.role);
    success(LoginResponse {
        role: session_user.role,
    })
}

/// POST /api/logout - Destroy the session, if any.
pub async fn logout(session: Session) -> ApiResult<Ack> {
    let auth = AuthSession::new(&session);
    if let Some(user) = auth.current().await? {
        tracing::info!("User {} logged out", user.user_id);
    }
    auth.logout().await?;
    success(Ack {})
}
