//! Provider discovery and session token handling.

use serde::{Deserialize, Serialize};

use super::IssuerClient;
use crate::error::{ClientError, Result};

const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// OpenID provider metadata. Only the fields the CLI cares about are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: String,
    #[serde(default)]
    pub authorization_endpoint: Option<String>,
    #[serde(default)]
    pub token_endpoint: Option<String>,
    #[serde(default)]
    pub userinfo_endpoint: Option<String>,
    #[serde(default)]
    pub jwks_uri: Option<String>,
    #[serde(default)]
    pub registration_endpoint: Option<String>,
    #[serde(default)]
    pub scopes_supported: Vec<String>,
}

/// Session credential attached to every users call.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Result of a successful discovery.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub configuration: ProviderMetadata,
    pub token: BearerToken,
}

impl IssuerClient {
    /// Fetch the provider metadata and attach the stored session token.
    pub async fn discover(&mut self) -> Result<Discovery> {
        let url = self.url(DISCOVERY_PATH);
        tracing::debug!(%url, "discovering provider");

        let response = self.client.get(&url).send().await?;
        let configuration: ProviderMetadata =
            self.handle_response(response, "provider configuration").await?;

        if configuration.issuer.trim_end_matches('/') != self.base_url {
            tracing::warn!(
                expected = %self.base_url,
                advertised = %configuration.issuer,
                "provider advertises a different issuer"
            );
        }
        self.configuration = Some(configuration.clone());

        let token = self
            .stored_token
            .as_deref()
            .map(BearerToken::new)
            .ok_or_else(|| ClientError::NotAuthenticated {
                issuer: self.issuer_name.clone(),
            })?;

        Ok(Discovery {
            configuration,
            token,
        })
    }
}
