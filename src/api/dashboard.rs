//! Dashboard endpoint.

use axum::extract::State;
use tower_sessions::Session;

use super::{success, ApiResult};
use crate::auth::require_session;
use crate::models::{DashboardData, UserView};
use crate::AppState;

/// GET /api/dashboard-data - Notifications and materials; staff also get the user list.
///
/// The role shown is the one captured at login.
pub async fn dashboard_data(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<DashboardData> {
    let user = require_session(&session).await?;
    let document = state.store.load().await?;

    let users = user
        .role
        .is_staff()
        .then(|| document.users.iter().map(UserView::from).collect());

    success(DashboardData {
        logged_in: true,
        role: user.role,
        username: user.user_id,
        users,
        notifications: document.notifications,
        materials: document.materials,
    })
}
