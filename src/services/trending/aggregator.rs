use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;

use crate::external::SearchProvider;
use crate::models::Candidate;

/// Collects trending candidates across an ordered list of search queries
///
/// Queries are issued strictly in order. Once the accumulated candidate
/// count reaches `total_limit` no further queries are issued, so later
/// queries only act as fallbacks when earlier ones come back short.
#[derive(Clone)]
pub struct CandidateAggregator {
    provider: Arc<dyn SearchProvider>,
}

impl CandidateAggregator {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Fetch, deduplicate, shuffle and truncate
    ///
    /// Never fails: a query whose search errors contributes zero candidates.
    pub async fn collect(
        &self,
        queries: &[String],
        per_query_limit: u32,
        total_limit: usize,
    ) -> Vec<Candidate> {
        let source = self.provider.source();
        let mut candidates = Vec::new();

        for query in queries {
            tracing::debug!(query = %query, source = %source, "Searching for trending candidates");

            match self.provider.search(query, per_query_limit).await {
                Ok(hits) => {
                    let before = candidates.len();
                    candidates.extend(
                        hits.into_iter()
                            .filter_map(|hit| Candidate::from_hit(hit, source)),
                    );
                    tracing::debug!(
                        query = %query,
                        added = candidates.len() - before,
                        "Search query completed"
                    );
                }
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "Search query failed, skipping");
                }
            }

            if candidates.len() >= total_limit {
                break;
            }
        }

        Self::select(candidates, total_limit, &mut rand::rng())
    }

    /// Deduplicate, shuffle and truncate already-fetched candidates
    pub fn select<R: Rng + ?Sized>(
        candidates: Vec<Candidate>,
        total_limit: usize,
        rng: &mut R,
    ) -> Vec<Candidate> {
        let mut unique = Self::dedup(candidates);
        shuffle(&mut unique, rng);
        unique.truncate(total_limit);
        unique
    }

    /// Keep the first candidate seen for each case-insensitive `title-artist` key
    pub fn dedup(candidates: Vec<Candidate>) -> Vec<Candidate> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|c| seen.insert(c.dedup_key()))
            .collect()
    }
}

/// Uniform in-place Fisher–Yates shuffle
fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
