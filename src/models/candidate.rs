//! Trending candidates built from search hits.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::SearchHit;

/// Separator between artist and track in video titles
const ARTIST_SEPARATOR: &str = " - ";

/// Search provider a candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Youtube,
}

impl CandidateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateSource::Youtube => "youtube",
        }
    }
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track eligible for the trending notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Candidate {
    id: String,
    title: String,
    artist: String,
    thumbnail: Option<String>,
    source: CandidateSource,
}

impl Candidate {
    /// Build a candidate from a raw hit
    ///
    /// Returns `None` for hits without an id. The artist is the trimmed text
    /// before the first `" - "` in the title, or the channel name when the
    /// title has no separator or nothing before it.
    pub fn from_hit(hit: SearchHit, source: CandidateSource) -> Option<Self> {
        let id = hit.id.filter(|id| !id.trim().is_empty())?;

        let artist = hit
            .title
            .split_once(ARTIST_SEPARATOR)
            .map(|(left, _)| left.trim())
            .filter(|left| !left.is_empty())
            .map(str::to_string)
            .unwrap_or(hit.channel_title);

        Some(Self {
            id,
            title: hit.title,
            artist,
            thumbnail: hit.thumbnail.filter(|t| !t.is_empty()),
            source,
        })
    }

    /// Case-insensitive `title-artist` key used for deduplication
    pub fn dedup_key(&self) -> String {
        format!("{}-{}", self.title, self.artist).to_lowercase()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn source(&self) -> CandidateSource {
        self.source
    }
}
