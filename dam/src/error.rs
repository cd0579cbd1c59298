use thiserror::Error;

#[derive(Error, Debug)]
pub enum DamError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Contract(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl DamError {
    /// Map a non-2xx status and response body to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => DamError::Unauthorized(body),
            403 => DamError::Forbidden(body),
            _ => DamError::Http {
                status,
                message: body,
            },
        }
    }

    /// Text suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            DamError::Unauthorized(_) => "unauthorized - please log in again".to_string(),
            DamError::Forbidden(_) => "forbidden - insufficient privileges".to_string(),
            DamError::Http { status, .. } => format!("request failed with status {status}"),
            DamError::Request(e) => format!("request failed: {e}"),
            DamError::Validation(msg) => msg.clone(),
            other => format!("request failed: {other}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, DamError>;
