use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent on every outbound request
pub const USER_AGENT: &str = concat!("phonk-relay/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance shared by the token, search and push clients
///
/// Initialized lazily on first access and reused across the application, so
/// TCP/TLS connections to Google endpoints are pooled between requests.
///
/// # Features
/// - **Compression**: gzip, deflate, brotli and zstd responses
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **TLS**: rustls, no OpenSSL dependency
///
/// # Example
/// ```rust,ignore
/// use phonk_relay::external::client::HTTP_CLIENT;
///
/// async fn fetch_data() -> Result<String, reqwest::Error> {
///     HTTP_CLIENT
///         .get("https://www.googleapis.com/discovery/v1/apis")
///         .send()
///         .await?
///         .text()
///         .await
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Enable compression (gzip, deflate, brotli, zstd)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});
