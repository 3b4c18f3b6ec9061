use reqwest::Client;

use super::error::OmdbError;
use super::types::{parse_detail, OmdbSearchResponse};
use crate::traits::{MovieSummary, SearchOutcome, SearchProvider};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb client. Every call is a `GET` on the base URL with query parameters.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: Client::new(),
        }
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, OmdbError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "OMDb API error");
            Err(OmdbError::Api {
                status,
                message: body,
            })
        }
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<serde_json::Value, OmdbError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| OmdbError::Parse(e.to_string()))
    }
}

impl SearchProvider for OmdbClient {
    type Error = OmdbError;

    async fn search(&self, query: &str) -> Result<SearchOutcome, OmdbError> {
        tracing::debug!(query, "OMDb search");
        let body = self.get_json(&[("s", query)]).await?;
        let search: OmdbSearchResponse =
            serde_json::from_value(body).map_err(|e| OmdbError::Parse(e.to_string()))?;
        Ok(search.into_outcome())
    }

    async fn detail(&self, id: &str) -> Result<MovieSummary, OmdbError> {
        tracing::debug!(id, "OMDb detail");
        let body = self.get_json(&[("i", id), ("plot", "full")]).await?;
        parse_detail(body)
    }
}
