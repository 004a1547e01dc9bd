//! HTTP client for an issuer's administration API.

pub mod discovery;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use nvl_core::{User, UserDraft};
use serde::Deserialize;

pub use discovery::{BearerToken, Discovery, ProviderMetadata};

use crate::error::{ClientError, Result};
use crate::issuers::Issuer;

/// Capabilities of a client bound to one issuer.
///
/// Every users operation needs a [`BearerToken`], and the only way to get
/// one is [`UsersApi::discover`].
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Fetch provider metadata and attach the session token.
    async fn discover(&mut self) -> Result<Discovery>;

    /// List all users.
    async fn list_users(&self, token: &BearerToken) -> Result<Vec<User>>;

    /// Register a new user.
    async fn create_user(&self, draft: &UserDraft, token: &BearerToken) -> Result<User>;

    /// Get user by ID.
    async fn get_user(&self, id: &str, token: &BearerToken) -> Result<User>;

    /// Apply changes to a user.
    async fn update_user(&self, id: &str, changes: &UserDraft, token: &BearerToken)
        -> Result<User>;

    /// Delete user by ID.
    async fn delete_user(&self, id: &str, token: &BearerToken) -> Result<()>;
}

/// Builds a client for a resolved issuer.
pub trait Connector: Send + Sync {
    fn connect(&self, issuer: &Issuer) -> Result<Box<dyn UsersApi>>;
}

/// Connector producing [`IssuerClient`]s.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    timeout: Duration,
}

impl HttpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Connector for HttpConnector {
    fn connect(&self, issuer: &Issuer) -> Result<Box<dyn UsersApi>> {
        Ok(Box::new(IssuerClient::new(issuer, self.timeout)?))
    }
}

/// HTTP client for one issuer.
#[derive(Clone)]
pub struct IssuerClient {
    client: reqwest::Client,
    base_url: String,
    issuer_name: String,
    stored_token: Option<String>,
    configuration: Option<ProviderMetadata>,
}

impl IssuerClient {
    /// Create a client for the given issuer.
    ///
    /// Fails when the issuer URL is not an absolute http(s) URL.
    pub fn new(issuer: &Issuer, timeout: Duration) -> Result<Self> {
        let url = url::Url::parse(&issuer.issuer).map_err(|e| {
            ClientError::ClientConstruction(format!("invalid issuer URL {:?}: {e}", issuer.issuer))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::ClientConstruction(format!(
                "unsupported issuer URL scheme: {}",
                url.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ClientConstruction(e.to_string()))?;

        Ok(Self {
            client,
            base_url: url.as_str().trim_end_matches('/').to_string(),
            issuer_name: issuer.name.clone(),
            stored_token: issuer.access_token().map(str::to_string),
            configuration: None,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Provider metadata from the last successful discovery.
    pub fn configuration(&self) -> Option<&ProviderMetadata> {
        self.configuration.as_ref()
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), resource, "response received");

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                ClientError::InvalidResponse(format!("cannot decode {resource}: {e}"))
            })
        } else {
            Err(Self::error_from(response, resource).await)
        }
    }

    /// Handle delete responses (no body expected).
    async fn handle_delete_response(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<()> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), resource, "response received");

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response, resource).await)
        }
    }

    async fn error_from(response: reqwest::Response, resource: &str) -> ClientError {
        let status = response.status().as_u16();
        if status == 404 {
            return ClientError::NotFound {
                resource: resource.to_string(),
            };
        }
        let body = response.text().await.unwrap_or_default();
        ClientError::Api {
            status,
            message: error_message(&body),
        }
    }
}

impl std::fmt::Debug for IssuerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerClient")
            .field("base_url", &self.base_url)
            .field("issuer_name", &self.issuer_name)
            .field("has_token", &self.stored_token.is_some())
            .finish()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

/// Extracts a readable message from an error body.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_description.or(b.message).or(b.error));

    match parsed {
        Some(message) => message,
        None if body.trim().is_empty() => "Unknown error".to_string(),
        None => body.trim().to_string(),
    }
}

#[async_trait]
impl UsersApi for IssuerClient {
    async fn discover(&mut self) -> Result<Discovery> {
        IssuerClient::discover(self).await
    }

    async fn list_users(&self, token: &BearerToken) -> Result<Vec<User>> {
        IssuerClient::list_users(self, token).await
    }

    async fn create_user(&self, draft: &UserDraft, token: &BearerToken) -> Result<User> {
        IssuerClient::create_user(self, draft, token).await
    }

    async fn get_user(&self, id: &str, token: &BearerToken) -> Result<User> {
        IssuerClient::get_user(self, id, token).await
    }

    async fn update_user(
        &self,
        id: &str,
        changes: &UserDraft,
        token: &BearerToken,
    ) -> Result<User> {
        IssuerClient::update_user(self, id, changes, token).await
    }

    async fn delete_user(&self, id: &str, token: &BearerToken) -> Result<()> {
        IssuerClient::delete_user(self, id, token).await
    }
}
