//! Recipe API client
//!
//! `RecipeApi` is the seam between the gallery controller and the server;
//! `HttpRecipeApi` is the real implementation, tests substitute an
//! in-memory double.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use recipes_common::models::{IncrementResponse, RecipeSummary, SaveRecipeResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API client errors
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Parse(String),
}

/// Server operations the gallery controller depends on
///
/// Fetched payloads travel as opaque JSON: the controller forwards them to
/// the save endpoint unchanged and only reads the fields it renders.
#[async_trait]
pub trait RecipeApi {
    async fn fetch_recipe(&self, url: &str) -> Result<Value, ApiClientError>;
    async fn list_recipes(&self) -> Result<Vec<RecipeSummary>, ApiClientError>;
    async fn save_recipe(&self, recipe: &Value) -> Result<SaveRecipeResponse, ApiClientError>;
    async fn increment_cooked(&self, id: i64) -> Result<IncrementResponse, ApiClientError>;
    async fn delete_recipe(&self, id: i64) -> Result<(), ApiClientError>;
}

/// HTTP implementation of [`RecipeApi`]
pub struct HttpRecipeApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpRecipeApi {
    /// Create a client for a server base URL (e.g. `http://127.0.0.1:5780`)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiClientError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn fetch_recipe(&self, url: &str) -> Result<Value, ApiClientError> {
        let response = self
            .http
            .get(self.url("/fetch-recipe"))
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn list_recipes(&self) -> Result<Vec<RecipeSummary>, ApiClientError> {
        let response = self
            .http
            .get(self.url("/get-recipes"))
            .send()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn save_recipe(&self, recipe: &Value) -> Result<SaveRecipeResponse, ApiClientError> {
        let response = self
            .http
            .post(self.url("/save-recipe"))
            .json(recipe)
            .send()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn increment_cooked(&self, id: i64) -> Result<IncrementResponse, ApiClientError> {
        let response = self
            .http
            .post(self.url(&format!("/increment-cooked/{}", id)))
            .send()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn delete_recipe(&self, id: i64) -> Result<(), ApiClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/delete-recipe/{}", id)))
            .send()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiClientError::Status(status.as_u16()));
        }

        Ok(())
    }
}
