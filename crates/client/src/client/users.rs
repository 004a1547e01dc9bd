//! User API operations.

use nvl_core::{User, UserDraft};

use super::{BearerToken, IssuerClient};
use crate::error::{ClientError, Result};

impl IssuerClient {
    fn users_url(&self) -> String {
        self.url("/v1/users")
    }

    /// URL of a single user. Ids that would resolve to another path once
    /// dot segments are normalised never name a user.
    fn user_url(&self, id: &str) -> Result<String> {
        if matches!(id, "" | "." | "..") {
            return Err(ClientError::NotFound {
                resource: format!("user {id}"),
            });
        }
        Ok(self.url(&format!("/v1/users/{}", urlencode(id))))
    }

    /// List all users.
    pub async fn list_users(&self, token: &BearerToken) -> Result<Vec<User>> {
        tracing::debug!("listing users");
        let response = self
            .client
            .get(self.users_url())
            .bearer_auth(token.as_str())
            .send()
            .await?;
        self.handle_response(response, "users").await
    }

    /// Create a new user.
    pub async fn create_user(&self, draft: &UserDraft, token: &BearerToken) -> Result<User> {
        tracing::debug!("creating user");
        let response = self
            .client
            .post(self.users_url())
            .bearer_auth(token.as_str())
            .json(draft)
            .send()
            .await?;
        self.handle_response(response, "user").await
    }

    /// Get user by ID.
    pub async fn get_user(&self, id: &str, token: &BearerToken) -> Result<User> {
        tracing::debug!(id, "fetching user");
        let response = self
            .client
            .get(self.user_url(id)?)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        self.handle_response(response, &format!("user {id}")).await
    }

    /// Update a user.
    pub async fn update_user(
        &self,
        id: &str,
        changes: &UserDraft,
        token: &BearerToken,
    ) -> Result<User> {
        tracing::debug!(id, "updating user");
        let response = self
            .client
            .patch(self.user_url(id)?)
            .bearer_auth(token.as_str())
            .json(changes)
            .send()
            .await?;
        self.handle_response(response, &format!("user {id}")).await
    }

    /// Delete user by ID.
    pub async fn delete_user(&self, id: &str, token: &BearerToken) -> Result<()> {
        tracing::debug!(id, "deleting user");
        let response = self
            .client
            .delete(self.user_url(id)?)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        self.handle_delete_response(response, &format!("user {id}"))
            .await
    }
}

/// Percent-encodes a path segment.
fn urlencode(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
