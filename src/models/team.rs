//! Team roster text, keyed by an arbitrary role id (e.g. "president").
//!
//! Photos are not referenced here; they live on disk as `team/<roleId>.jpg`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

pub type Team = BTreeMap<String, TeamEntry>;

/// Text fields of the update-team-member form.
#[derive(Debug, Clone, Default)]
pub struct TeamMemberForm {
    pub role_id: Option<String>,
    pub member_name: Option<String>,
    pub member_tag: Option<String>,
}

impl TeamMemberForm {
    /// Apply the form to `team`, returning the resulting entry if one exists.
    ///
    /// A blank name is ignored; a present tag is applied even when empty. No entry
    /// is created unless something is written to it.
    pub fn apply(&self, role_id: &str, team: &mut Team) -> Option<TeamEntry> {
        if let Some(name) = self.member_name.as_deref().filter(|n| !n.is_empty()) {
            team.entry(role_id.to_string()).or_default().name = Some(name.to_string());
        }
        if let Some(tag) = &self.member_tag {
            team.entry(role_id.to_string()).or_default().tag = Some(tag.clone());
        }
        team.get(role_id).cloned()
    }
}

/// Whether `role_id` can safely name a file inside the team directory.
pub fn is_valid_role_id(role_id: &str) -> bool {
    !role_id.is_empty()
        && !role_id.starts_with('.')
        && !role_id.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
}
