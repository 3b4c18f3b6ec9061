use serde::Deserialize;

use crate::traits::CatalogItem;

/// Body of the `movie/{category}` list endpoints.
#[derive(Debug, Deserialize)]
pub struct TmdbListResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<CatalogItem>,
    pub total_results: Option<u64>,
}

/// Error body TMDB returns with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct TmdbStatus {
    pub status_code: Option<u32>,
    pub status_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_list_response() {
        let json = r#"{
            "dates": { "maximum": "2025-11-05", "minimum": "2025-10-15" },
            "page": 1,
            "results": [
                {
                    "adult": false,
                    "id": 1087192,
                    "title": "How to Train Your Dragon",
                    "poster_path": "/q5pXRYTycaeW6dEgsCrd4mYPmxM.jpg",
                    "release_date": "2025-06-06",
                    "vote_average": 8.0
                },
                {
                    "id": 1311031,
                    "title": "Untitled",
                    "poster_path": null,
                    "release_date": ""
                }
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;

        let resp: TmdbListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.page, 1);
        assert_eq!(resp.results.len(), 2);

        let first = &resp.results[0];
        assert_eq!(first.id, 1087192);
        assert_eq!(
            first.release_date,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 6)
        );
        assert_eq!(first.vote_average, Some(8.0));

        let second = &resp.results[1];
        assert!(second.poster_path.is_none());
        assert!(second.release_date.is_none());
    }

    #[test]
    fn test_deserialize_status() {
        let json = r#"{ "status_code": 7, "status_message": "Invalid API key: You must be granted a valid key.", "success": false }"#;
        let status: TmdbStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.status_code, Some(7));
        assert!(status.status_message.unwrap().starts_with("Invalid API key"));
    }
}
