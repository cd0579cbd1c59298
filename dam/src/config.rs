/// Default backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Configuration for the DAM client.
#[derive(Debug, Clone)]
pub struct DamConfig {
    /// Base URL of the REST backend (e.g. `http://127.0.0.1:8000`).
    pub base_url: String,
    /// Auth token sent as `Authorization: Token <token>`.
    pub token: Option<String>,
    /// Page size requested from the backend for list views.
    pub page_size: u32,
    /// Page size used for unpaged exports.
    pub export_page_size: u32,
}

impl Default for DamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            page_size: 20,
            export_page_size: 10_000,
        }
    }
}
