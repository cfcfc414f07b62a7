//! The persisted document: the single source of truth for all text data.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{Material, Notification, Role, Team, User};

/// Root of `database.json`.
///
/// `notifications` and `materials` are kept newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub users: Vec<User>,
    pub notifications: Vec<Notification>,
    pub materials: Vec<Material>,
    #[serde(default)]
    pub team: Team,
}

impl Document {
    /// A fresh document holding only the bootstrap superadmin.
    pub fn bootstrap(username: &str, password_hash: String) -> Self {
        Self {
            users: vec![User {
                username: username.to_string(),
                password_hash,
                role: Role::Superadmin,
                created_at: now_timestamp(),
            }],
            ..Default::default()
        }
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn find_user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.username == username)
    }

    /// Remove a user by name. Returns whether anything was removed.
    pub fn remove_user(&mut self, username: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.username != username);
        self.users.len() != before
    }

    /// Prepend a notification and return it.
    pub fn push_notification(&mut self, text: String) -> Notification {
        let notification = Notification {
            id: next_entry_id(self.notifications.first().map(|n| n.id)),
            text,
            date: now_timestamp(),
        };
        self.notifications.insert(0, notification.clone());
        notification
    }

    /// Prepend a material and return it.
    pub fn push_material(&mut self, title: String, kind: String, link: Option<String>) -> Material {
        let material = Material {
            id: next_entry_id(self.materials.first().map(|m| m.id)),
            title,
            kind,
            link,
            date: now_timestamp(),
        };
        self.materials.insert(0, material.clone());
        material
    }
}

/// Creation-time id, strictly greater than the newest existing one.
pub fn next_entry_id(newest: Option<i64>) -> i64 {
    let now = Utc::now().timestamp_millis();
    match newest {
        Some(id) if id >= now => id + 1,
        _ => now,
    }
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}
