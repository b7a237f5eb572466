use async_trait::async_trait;
use reqwest::Url;

use super::types::{SearchListResponse, SearchResult};
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use crate::external::search::{SearchHit, SearchProvider};
use crate::models::CandidateSource;

/// YouTube Data API v3 `search.list` client
#[derive(Clone)]
pub struct YoutubeSearch {
    api_key: Option<String>,
    base_url: String,
}

impl YoutubeSearch {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into(),
        }
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::ExternalApi {
            provider: "YouTube".into(),
            message: message.into(),
            source,
        }
    }

    fn search_url(&self, api_key: &str, query: &str, max_results: u32) -> AppResult<Url> {
        let endpoint = format!("{}/search", self.base_url.trim_end_matches('/'));
        let max_results = max_results.to_string();
        Url::parse_with_params(
            &endpoint,
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ],
        )
        .map_err(|e| Self::make_error(format!("invalid search endpoint: {}", e), Some(e.into())))
    }

    fn to_hit(result: SearchResult) -> Option<SearchHit> {
        let snippet = result.snippet?;
        let thumbnail = snippet
            .thumbnails
            .medium
            .or(snippet.thumbnails.default)
            .map(|t| t.url);

        Some(SearchHit {
            id: result.id.and_then(|id| id.video_id),
            title: snippet.title,
            channel_title: snippet.channel_title,
            thumbnail,
        })
    }
}

#[async_trait]
impl SearchProvider for YoutubeSearch {
    fn source(&self) -> CandidateSource {
        CandidateSource::Youtube
    }

    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<SearchHit>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Self::make_error("API key not configured", None))?;
        let url = self.search_url(api_key, query, max_results)?;

        // The key travels in the query string; never log the full URL.
        let resp = HTTP_CLIENT
            .get(url)
            .send()
            .await
            .map_err(|e| {
                Self::make_error(
                    format!("search({}) request failed: {}", query, e.without_url()),
                    None,
                )
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::make_error(
                format!("search({}) HTTP error: {}", query, status),
                None,
            ));
        }

        let data: SearchListResponse = resp.json().await.map_err(|e| {
            Self::make_error(
                format!("search({}) invalid JSON: {}", query, e.without_url()),
                None,
            )
        })?;

        Ok(data.items.into_iter().filter_map(Self::to_hit).collect())
    }
}
