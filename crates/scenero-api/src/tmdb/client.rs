use reqwest::Client;

use super::error::TmdbError;
use super::types::{TmdbListResponse, TmdbStatus};
use crate::traits::{CatalogItem, CatalogProvider, Category};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB v3 client for the curated movie lists.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http: Client::new(),
        }
    }

    /// Check the HTTP response for errors, preferring TMDB's `status_message`.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<TmdbStatus>(&body)
            .ok()
            .and_then(|s| s.status_message)
            .unwrap_or(body);
        tracing::warn!(status, "TMDB API error");
        Err(TmdbError::Api { status, message })
    }
}

impl CatalogProvider for TmdbClient {
    type Error = TmdbError;

    async fn list_by_category(&self, category: Category) -> Result<Vec<CatalogItem>, TmdbError> {
        tracing::debug!(category = category.as_path(), "TMDB list");
        let resp = self
            .http
            .get(format!("{}/movie/{}", self.base_url, category.as_path()))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let list: TmdbListResponse = resp
            .json()
            .await
            .map_err(|e| TmdbError::Parse(e.to_string()))?;

        Ok(list.results)
    }
}
