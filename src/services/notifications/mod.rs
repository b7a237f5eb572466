//! Push notification pipeline.
//!
//! `NotificationComposer` builds envelopes, `Dispatcher` submits them through
//! a `PushTransport` (FCM HTTP v1 in production) and `NotificationService`
//! ties both to the token provider and the trending aggregator.

mod composer;
mod dispatcher;
mod fcm_provider;
mod provider;

pub mod notification_service;

pub use composer::{CLICK_ACTION, NotificationComposer, TRENDING_TITLE};
pub use dispatcher::Dispatcher;
pub use fcm_provider::FcmTransport;
pub use notification_service::{NotificationService, TrendingOutcome};
pub use provider::{PushTransport, TransportResponse};
