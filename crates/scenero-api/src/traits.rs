//! Trait definitions for movie data providers.
//!
//! The search provider (OMDb) and the catalog provider (TMDB) implement
//! these traits, so the controller never depends on a concrete client and
//! can be driven by fakes in tests.

use std::collections::BTreeMap;
use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Title search plus per-title detail lookup.
pub trait SearchProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Search titles matching `query`.
    fn search(&self, query: &str) -> impl Future<Output = Result<SearchOutcome, Self::Error>> + Send;

    /// Fetch the full record for one title.
    fn detail(&self, id: &str) -> impl Future<Output = Result<MovieSummary, Self::Error>> + Send;
}

/// Curated movie lists.
pub trait CatalogProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_by_category(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Vec<CatalogItem>, Self::Error>> + Send;
}

/// Result of the search phase.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<SearchHit>),
    /// Negative status, with the provider's message when it sent one.
    NotFound(Option<String>),
}

/// One row of a search response. Only the identifier is needed to enrich it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Poster", default, deserialize_with = "not_available")]
    pub poster: Option<String>,
}

/// A fully fetched movie record.
///
/// Field names and values on the wire are the provider's own, including
/// OMDb's `"N/A"`, so a stored record round-trips unchanged. Use
/// [`available`] when displaying a field. Anything not modelled here is kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(rename = "Genre", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "Runtime", default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Actors", default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MovieSummary {
    /// A record with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster: None,
            rating: None,
            genre: None,
            runtime: None,
            actors: None,
            plot: None,
            extra: BTreeMap::new(),
        }
    }

    /// Poster URL, or `fallback` when the provider has none.
    pub fn poster_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        available(&self.poster).unwrap_or(fallback)
    }
}

/// A movie from a curated list. Ids are TMDB ids, unrelated to
/// [`MovieSummary::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub vote_average: Option<f32>,
}

impl CatalogItem {
    /// Full poster URL under `image_base` (e.g. `https://image.tmdb.org/t/p/w300`).
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base.trim_end_matches('/'), path))
    }
}

/// The curated lists shown under the search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Upcoming,
    Popular,
    TopRated,
}

impl Category {
    pub const ALL: &[Category] = &[Self::Upcoming, Self::Popular, Self::TopRated];

    /// Path segment used by the TMDB `movie/{category}` endpoints.
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "Upcoming Movies"),
            Self::Popular => write!(f, "Popular Movies"),
            Self::TopRated => write!(f, "Top Rated Movies"),
        }
    }
}

/// A provider value, or `None` when it is missing, blank or OMDb's `"N/A"`.
pub fn available(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty() && *v != "N/A")
}

/// OMDb uses `"N/A"` for missing values.
fn not_available<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty() && v != "N/A"))
}

/// TMDB sends `""` for unknown release dates.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok()))
}
