use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry from `/api/activity/logs/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: u64,
    pub username: String,
    /// Free-form on the wire (`login`, `upload`, `delete`, ...).
    pub action_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}
