use crate::types::{LoginResponse, Role};

/// Authenticated identity threaded through every request.
///
/// Constructed by the caller and passed in explicitly; the client never
/// looks the token up on its own.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Fold a login response into the session, keeping the existing token
    /// unless the response carries a new one.
    pub fn apply_login(&mut self, login: &LoginResponse) {
        self.username = Some(login.username.clone());
        self.role = Some(login.role);
        if let Some(token) = &login.token {
            self.token = Some(token.clone());
        }
    }

    /// Value for the `Authorization` header, if a token is set.
    pub fn authorization(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Token {t}"))
    }

    /// Whether the known role allows `check`. An unknown role is allowed
    /// through; the backend has the final say.
    pub fn permits(&self, check: fn(Role) -> bool) -> bool {
        self.role.map(check).unwrap_or(true)
    }
}
