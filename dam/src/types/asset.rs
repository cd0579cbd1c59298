use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::AssetKind;

/// A stored asset as returned by `/api/assets/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// URL of the stored file.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_kind", alias = "type")]
    pub file_type: AssetKind,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub polygon_count: Option<u64>,
    #[serde(default)]
    pub dimensions: Option<String>,
    /// Owning user id.
    #[serde(default)]
    pub user: Option<u64>,
}

fn default_kind() -> AssetKind {
    AssetKind::Other
}

/// Largest file the backend accepts.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Metadata sent alongside an uploaded file.
#[derive(Debug, Clone, Default)]
pub struct NewAsset {
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub keywords: String,
    pub is_public: bool,
}

impl NewAsset {
    /// Split a comma-separated tag field, trimming and dropping blanks.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}
