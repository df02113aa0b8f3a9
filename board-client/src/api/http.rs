//! reqwest implementation of the REST port.

use super::{Api, ApiError};
use async_trait::async_trait;
use board_types::{Transaction, User, UserId, UserSummary};
use serde::Deserialize;

/// Shape of the server's structured error body:
/// `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ServerError {
    error: ServerErrorBody,
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    message: String,
}

/// REST client for the leaderboard backend.
pub struct HttpApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpApi {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self, tail: &str) -> String {
        format!("{}/api/users/{}", self.base_url, tail)
    }

    fn transactions_url(&self) -> String {
        format!("{}/api/transactions/", self.base_url)
    }

    /// Map a non-success response to an error, extracting the server's
    /// structured message when the body carries one.
    async fn response_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ServerError>(&body) {
            Ok(server) => ApiError::Rejected {
                message: server.error.message,
            },
            Err(_) => ApiError::UnexpectedResponse { status, body },
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn fetch_leaderboard(&self) -> Result<Vec<User>, ApiError> {
        self.get_json(self.users_url("leaderboard")).await
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, ApiError> {
        self.get_json(self.users_url(&id.to_string())).await
    }

    async fn fetch_all_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json(self.users_url("")).await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        self.get_json(self.users_url(&format!("search/{}", query)))
            .await
    }

    async fn create_transaction(
        &self,
        transaction: &Transaction,
        token: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.transactions_url())
            .bearer_auth(token)
            .json(transaction)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        // The returned transaction echo is intentionally discarded; the
        // push channel is the only read path.
        Ok(())
    }

    async fn remove_transaction(
        &self,
        transaction: &Transaction,
        token: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.transactions_url())
            .bearer_auth(token)
            .json(transaction)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_construction() {
        let api = HttpApi::new("https://example.com");
        assert_eq!(
            api.users_url("leaderboard"),
            "https://example.com/api/users/leaderboard"
        );
        assert_eq!(api.users_url("42"), "https://example.com/api/users/42");
        assert_eq!(
            api.transactions_url(),
            "https://example.com/api/transactions/"
        );
    }

    #[test]
    fn server_error_shape_parses() {
        let body = r#"{"error": {"message": "Insufficient funds."}}"#;
        let parsed: ServerError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Insufficient funds.");
    }
}
