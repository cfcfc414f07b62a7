//! User accounts and roles.

use serde::{Deserialize, Serialize};

/// Access level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    /// Admins and superadmins manage users, materials and notifications.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }

    /// Role actually granted when `creator` asks for `requested`.
    ///
    /// Only a superadmin can hand out `admin`; everything else becomes `member`.
    pub fn resolve_new(creator: Role, requested: Option<&str>) -> Role {
        match (creator, requested) {
            (Role::Superadmin, Some("admin")) => Role::Admin,
            _ => Role::Member,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored account.
///
/// `password` holds an Argon2 PHC string. Documents written by older deployments
/// may still carry plaintext here; those are upgraded on the next successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
}

/// Account as exposed to staff on the dashboard. Never carries password material.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub username: String,
    pub role: Role,
    pub created_at: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
            created_at: user.created_at.clone(),
        }
    }
}

/// Request body for POST /api/login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for POST /api/admin/add-user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    #[serde(default)]
    pub new_username: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub new_role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_cannot_grant_admin() {
        assert_eq!(Role::resolve_new(Role::Admin, Some("admin")), Role::Member);
        assert_eq!(Role::resolve_new(Role::Admin, Some("member")), Role::Member);
    }

    #[test]
    fn test_superadmin_grants_admin_only() {
        assert_eq!(Role::resolve_new(Role::Superadmin, Some("admin")), Role::Admin);
        assert_eq!(
            Role::resolve_new(Role::Superadmin, Some("superadmin")),
            Role::Member
        );
        assert_eq!(Role::resolve_new(Role::Superadmin, None), Role::Member);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Role::Superadmin).unwrap(),
            serde_json::json!("superadmin")
        );
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(role.is_staff());
        assert!(!Role::Member.is_staff());
    }

    #[test]
    fn test_user_view_drops_password() {
        let user = User {
            username: "ada".into(),
            password_hash: "secret".into(),
            role: Role::Member,
            created_at: "2024-01-01T00:00:00Z".into(),
        };
        let value = serde_json::to_value(UserView::from(&user)).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00Z");
    }
}
