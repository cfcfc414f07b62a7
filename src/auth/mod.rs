//! Cookie-session authentication.
//!
//! The session layer (`tower-sessions`) owns the cookie and the keyed session store.
//! This module wraps the raw [`Session`] so handlers only ever see a typed
//! [`SessionUser`], and provides the two guards every protected endpoint uses.

pub mod password;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::errors::AppError;
use crate::models::Role;

const SESSION_AUTH_USER: &str = "auth:user";

/// Identity stored in a live session.
///
/// The role is copied at login and not refreshed until the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: String,
    pub role: Role,
}

/// Typed view over the authentication part of a session.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Establish a logged-in session.
    ///
    /// The session id is rotated first so an id planted before login is useless.
    pub async fn login(&self, user: &SessionUser) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_USER, user).await?;
        Ok(())
    }

    /// The logged-in user, if any.
    pub async fn current(&self) -> Result<Option<SessionUser>, AppError> {
        Ok(self.session.get::<SessionUser>(SESSION_AUTH_USER).await?)
    }

    /// Destroy the session and remove it from the store.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// Require a live session of any role. Missing session → 401.
pub async fn require_session(session: &Session) -> Result<SessionUser, AppError> {
    AuthSession::new(session)
        .current()
        .await?
        .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))
}

/// Require a session whose role is one of `allowed`.
///
/// Both a missing session and an insufficient role → 403.
pub async fn require_role(session: &Session, allowed: &[Role]) -> Result<SessionUser, AppError> {
    match AuthSession::new(session).current().await? {
        Some(user) if allowed.contains(&user.role) => Ok(user),
        Some(user) => {
            tracing::warn!(
                "User {} ({}) denied access requiring {:?}",
                user.user_id,
                user.role,
                allowed
            );
            Err(AppError::Forbidden("Forbidden".to_string()))
        }
        None => Err(AppError::Forbidden("Forbidden".to_string())),
    }
}

/// Roles allowed to manage users, materials and notifications.
pub const STAFF: &[Role] = &[Role::Admin, Role::Superadmin];

/// Roles allowed to manage the team roster and delete users.
pub const SUPERADMIN: &[Role] = &[Role::Superadmin];
