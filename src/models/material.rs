//! Shared learning materials.

use serde::{Deserialize, Serialize};

/// A material is either an uploaded file (link under `/uploads/`) or an external URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub date: String,
}

/// Text fields of the add-material form.
#[derive(Debug, Clone, Default)]
pub struct MaterialForm {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub link: Option<String>,
}
