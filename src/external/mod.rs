//! Outbound integrations: the shared HTTP client, Google service-account
//! token exchange and the YouTube search client.

pub mod client;
pub mod google;
pub mod search;
pub mod youtube;

pub use google::{FIREBASE_MESSAGING_SCOPE, ServiceAccountTokenProvider, TokenProvider};
pub use search::{SearchHit, SearchProvider};
pub use youtube::YoutubeSearch;
