use dam::{DamError, Role};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", .0.user_message())]
    Dam(#[from] DamError),

    /// A list load ended in the error state.
    #[error("{0}")]
    List(String),

    #[error("{0}")]
    Export(String),

    #[error("not permitted for role {0}")]
    NotPermitted(Role),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
