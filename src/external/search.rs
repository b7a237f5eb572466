use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::CandidateSource;

/// Provider-neutral raw search result
///
/// `id` is optional because search APIs may return channels or playlists
/// without a video id; those hits are dropped during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: Option<String>,
    pub title: String,
    pub channel_title: String,
    pub thumbnail: Option<String>,
}

/// A source of trending candidates
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Tag recorded on every candidate built from this provider's hits
    fn source(&self) -> CandidateSource;

    /// Return up to `max_results` hits for `query`
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<SearchHit>>;
}
