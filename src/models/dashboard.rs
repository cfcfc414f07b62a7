//! Dashboard payload returned to logged-in users.

use serde::Serialize;

use super::{Material, Notification, Role, UserView};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub logged_in: bool,
    pub role: Role,
    pub username: String,
    /// Only present for admins and superadmins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserView>>,
    pub notifications: Vec<Notification>,
    pub materials: Vec<Material>,
}
