//! Client error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Message shown when the issuer rejects the session token.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to the issuer.";

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No issuers configured in {}", dir.display())]
    NoIssuers { dir: PathBuf },

    #[error("Unknown issuer: {id}")]
    IssuerNotFound { id: String },

    #[error("Invalid issuer configuration {}: {reason}", path.display())]
    IssuerConfig { path: PathBuf, reason: String },

    #[error("Cannot create client: {0}")]
    ClientConstruction(String),

    #[error("No session token for issuer {issuer}")]
    NotAuthenticated { issuer: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the operator has to log in again before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::NotAuthenticated { .. })
            || matches!(self.status_code(), Some(401 | 403))
    }

    /// Line printed by the top-level dispatcher before exiting.
    pub fn report(&self) -> String {
        if self.requires_login() {
            LOGIN_REQUIRED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<dialoguer::Error> for ClientError {
    fn from(e: dialoguer::Error) -> Self {
        ClientError::Prompt(e.to_string())
    }
}
