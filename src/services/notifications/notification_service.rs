//! Notification orchestration for the post and trending entry points.

use std::sync::Arc;

use super::composer::NotificationComposer;
use super::dispatcher::Dispatcher;
use super::fcm_provider::FcmTransport;
use super::provider::PushTransport;
use crate::config::{Settings, TrendingConfig};
use crate::error::{AppError, AppResult};
use crate::external::{
    FIREBASE_MESSAGING_SCOPE, SearchProvider, ServiceAccountTokenProvider, TokenProvider,
    YoutubeSearch,
};
use crate::models::{DispatchResult, PostSubmission};
use crate::services::trending::CandidateAggregator;

/// Result of a trending pass
#[derive(Debug, Clone, PartialEq)]
pub enum TrendingOutcome {
    /// Aggregation found no candidates; nothing was sent
    NothingToNotify,
    Sent(DispatchResult),
}

/// Composes, authenticates and dispatches notifications
///
/// Holds only immutable configuration and shared collaborators, so clones
/// are cheap and invocations never share mutable state.
#[derive(Clone)]
pub struct NotificationService {
    composer: NotificationComposer,
    dispatcher: Dispatcher,
    tokens: Arc<dyn TokenProvider>,
    aggregator: CandidateAggregator,
    project_id: Option<String>,
    trending: TrendingConfig,
}

impl NotificationService {
    /// Creates a service with explicit collaborators
    pub fn new(
        settings: &Settings,
        tokens: Arc<dyn TokenProvider>,
        search: Arc<dyn SearchProvider>,
        transport: Arc<dyn PushTransport>,
    ) -> Self {
        Self {
            composer: NotificationComposer::new(settings.firebase.topic.clone()),
            dispatcher: Dispatcher::new(transport),
            tokens,
            aggregator: CandidateAggregator::new(search),
            project_id: settings.firebase.project_id().map(str::to_string),
            trending: settings.trending.clone(),
        }
    }

    /// Creates a service backed by Google OAuth2, YouTube search and FCM
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings,
            Arc::new(ServiceAccountTokenProvider::new(
                settings.firebase.service_account_key.clone(),
            )),
            Arc::new(YoutubeSearch::new(
                settings.youtube.api_key.clone(),
                settings.youtube.api_base_url.clone(),
            )),
            Arc::new(FcmTransport::new(settings.firebase.api_base_url.clone())),
        )
    }

    /// Default number of candidates a trending pass draws from
    pub fn trending_limit(&self) -> usize {
        self.trending.limit
    }

    /// Notify topic subscribers about a new post
    pub async fn notify_new_post(&self, post: &PostSubmission) -> AppResult<DispatchResult> {
        let envelope = self.composer.compose_from_post(post)?;
        let project_id = self.project_id()?;
        let token = self.tokens.access_token(FIREBASE_MESSAGING_SCOPE).await?;

        self.dispatcher.send(&envelope, &token, project_id).await
    }

    /// Run one trending pass
    ///
    /// `limit` overrides the configured candidate count. An empty
    /// aggregation short-circuits before any token is requested.
    pub async fn notify_trending(&self, limit: Option<usize>) -> AppResult<TrendingOutcome> {
        let limit = limit.unwrap_or(self.trending.limit);
        let candidates = self
            .aggregator
            .collect(&self.trending.queries, self.trending.per_query_limit, limit)
            .await;

        let Some(top) = candidates.first() else {
            tracing::info!("No trending candidates found, skipping notification");
            return Ok(TrendingOutcome::NothingToNotify);
        };

        tracing::info!(
            id = %top.id(),
            artist = %top.artist(),
            total = candidates.len(),
            "Selected trending candidate"
        );

        let envelope = self.composer.compose_from_candidate(top, candidates.len());
        let project_id = self.project_id()?;
        let token = self.tokens.access_token(FIREBASE_MESSAGING_SCOPE).await?;

        self.dispatcher
            .send(&envelope, &token, project_id)
            .await
            .map(TrendingOutcome::Sent)
    }

    fn project_id(&self) -> AppResult<&str> {
        self.project_id
            .as_deref()
            .ok_or_else(|| AppError::missing_config("firebase.project_id", "Firebase project ID"))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Counting fakes shared by service, handler and job tests.

    use super::*;
    use crate::external::SearchHit;
    use crate::models::CandidateSource;
    use crate::services::notifications::provider::TransportResponse;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    pub struct FakeTokens {
        pub calls: AtomicUsize,
        pub fail: bool,
    }

    impl FakeTokens {
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenProvider for FakeTokens {
        async fn access_token(&self, scope: &str) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(scope, FIREBASE_MESSAGING_SCOPE);
            if self.fail {
                return Err(AppError::missing_config(
                    "firebase.service_account_key",
                    "Service account credential",
                ));
            }
            Ok("ya29.fake".to_string())
        }
    }

    /// Search provider returning the same hits for every query
    #[derive(Default)]
    pub struct FakeSearch {
        pub hits: Vec<SearchHit>,
        pub calls: AtomicUsize,
    }

    impl FakeSearch {
        pub fn with_titles(titles: &[&str]) -> Self {
            Self {
                hits: titles
                    .iter()
                    .enumerate()
                    .map(|(i, title)| SearchHit {
                        id: Some(format!("vid{i}")),
                        title: title.to_string(),
                        channel_title: "Phonk Channel".to_string(),
                        thumbnail: Some(format!("https://i.ytimg.com/vi/vid{i}/mqdefault.jpg")),
                    })
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchProvider for FakeSearch {
        fn source(&self) -> CandidateSource {
            CandidateSource::Youtube
        }

        async fn search(&self, _query: &str, max_results: u32) -> AppResult<Vec<SearchHit>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.hits.iter().take(max_results as usize).cloned().collect())
        }
    }

    pub struct FakeTransport {
        pub status: u16,
        pub body: String,
        pub sent: Mutex<Vec<Value>>,
    }

    impl FakeTransport {
        pub fn replying(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn ok() -> Self {
            Self::replying(200, r#"{"name":"projects/phonkers-app/messages/1"}"#)
        }

        pub fn sent(&self) -> Vec<Value> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PushTransport for FakeTransport {
        async fn send(
            &self,
            _project_id: &str,
            _token: &str,
            payload: &Value,
        ) -> anyhow::Result<TransportResponse> {
            self.sent.lock().unwrap().push(payload.clone());
            Ok(TransportResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    pub fn settings_with_project() -> Settings {
        let mut settings = Settings::default();
        settings.firebase.project_id = Some("phonkers-app".to_string());
        settings
    }

    pub struct Harness {
        pub tokens: Arc<FakeTokens>,
        pub search: Arc<FakeSearch>,
        pub transport: Arc<FakeTransport>,
        pub service: NotificationService,
    }

    pub fn harness(settings: &Settings, search: FakeSearch, transport: FakeTransport) -> Harness {
        let tokens = Arc::new(FakeTokens::default());
        let search = Arc::new(search);
        let transport = Arc::new(transport);
        let service =
            NotificationService::new(settings, tokens.clone(), search.clone(), transport.clone());
        Harness {
            tokens,
            search,
            transport,
            service,
        }
    }
}
