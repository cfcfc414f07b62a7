//! Notices broadcast to every logged-in user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub text: String,
    pub date: String,
}

/// Request body for POST /api/admin/notify.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyRequest {
    #[serde(default)]
    pub text: String,
}
