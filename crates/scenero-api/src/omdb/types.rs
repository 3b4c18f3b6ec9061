use serde::Deserialize;

use crate::traits::{MovieSummary, SearchHit, SearchOutcome};

use super::error::OmdbError;

// ── Search response ─────────────────────────────────────────────

/// Body of `?s=<query>`. OMDb reports failures in-band with
/// `"Response": "False"` and an `Error` message.
#[derive(Debug, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchHit>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn into_outcome(self) -> SearchOutcome {
        if is_negative(&self.response) {
            SearchOutcome::NotFound(self.error.filter(|e| !e.is_empty()))
        } else {
            SearchOutcome::Found(self.search)
        }
    }
}

// ── Detail response ─────────────────────────────────────────────

/// Parse the body of `?i=<id>`. A negative response becomes
/// [`OmdbError::NotFound`].
pub fn parse_detail(body: serde_json::Value) -> Result<MovieSummary, OmdbError> {
    let negative = body
        .get("Response")
        .and_then(|r| r.as_str())
        .is_some_and(is_negative);

    if negative {
        let message = body
            .get("Error")
            .and_then(|e| e.as_str())
            .unwrap_or("Movie not found!")
            .to_string();
        return Err(OmdbError::NotFound(message));
    }

    serde_json::from_value(body).map_err(|e| OmdbError::Parse(e.to_string()))
}

fn is_negative(response: &str) -> bool {
    response.eq_ignore_ascii_case("false")
}
