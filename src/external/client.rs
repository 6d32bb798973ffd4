//! Shared HTTP client used by provider adapters and the callback emitter.

use std::sync::LazyLock;
use std::time::Duration;

/// Global HTTP client instance with pooling and compression configured once.
///
/// Reused by the Firebase/Africa's Talking/Belio provider adapters and the
/// webhook callback emitter so outbound requests share connection pooling
/// instead of building a fresh `reqwest::Client` per call.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .use_rustls_tls()
        .user_agent(concat!("notify-bus/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        let _ = &*HTTP_CLIENT;
    }
}
