//! Session tokens and the login exchange.

use crate::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of session a token represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Issued by the admin login endpoint.
    Admin,
    /// Regular user access token.
    Access,
}

impl TokenKind {
    /// Lookup order when resolving the current session.
    pub const PRECEDENCE: [TokenKind; 2] = [TokenKind::Admin, TokenKind::Access];

    /// Storage key for this kind.
    pub fn storage_key(&self) -> &'static str {
        match self {
            TokenKind::Admin => "adminToken",
            TokenKind::Access => "accessToken",
        }
    }

    /// Parse from a storage key.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        match key {
            "adminToken" => Some(TokenKind::Admin),
            "accessToken" => Some(TokenKind::Access),
            _ => None,
        }
    }

    /// Login route for sessions of this kind.
    pub fn login_route(&self) -> &'static str {
        match self {
            TokenKind::Admin => "/admin/login",
            TokenKind::Access => "/login",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Admin => write!(f, "admin"),
            TokenKind::Access => write!(f, "access"),
        }
    }
}

/// A bearer token held by the session.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    value: String,
    kind: TokenKind,
}

impl AuthToken {
    /// Wrap a token value. Blank values are rejected.
    pub fn new(value: impl Into<String>, kind: TokenKind) -> Result<Self, SessionError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SessionError::InvalidToken);
        }
        Ok(Self { value, kind })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Check if this is an admin token.
    pub fn is_admin(&self) -> bool {
        self.kind == TokenKind::Admin
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

// Keep token values out of logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("kind", &self.kind)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Body of the admin login request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields are required and the email must look like one.
    pub fn validate(&self) -> Result<(), SessionError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(SessionError::InvalidCredentials("email is required".to_string()));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(SessionError::InvalidCredentials(format!(
                    "not an email address: {email}"
                )))
            }
        }
        if self.password.is_empty() {
            return Err(SessionError::InvalidCredentials("password is required".to_string()));
        }
        Ok(())
    }
}

/// Response of the login endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Parse a response body.
    pub fn parse(body: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Extract the token; a response without one is a failed login.
    pub fn into_token(self, kind: TokenKind) -> Result<AuthToken, SessionError> {
        let value = self.token.ok_or(SessionError::InvalidToken)?;
        AuthToken::new(value, kind)
    }
}
