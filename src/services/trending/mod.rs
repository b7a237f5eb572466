//! Trending candidate aggregation.

mod aggregator;

pub use aggregator::CandidateAggregator;
