//! Google OAuth2 service-account support for the push API

mod credentials;
mod token;

pub use credentials::{DEFAULT_TOKEN_URI, ServiceAccountKey};
pub use token::{FIREBASE_MESSAGING_SCOPE, ServiceAccountTokenProvider, TokenProvider};
