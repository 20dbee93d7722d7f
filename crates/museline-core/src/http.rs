//! Blocking HTTP facade over a shared async client.
//!
//! The museum APIs are called strictly sequentially, so the async reqwest
//! client is driven through a small shared tokio runtime and exposed as a
//! sync interface. Timeouts are whatever the client enforces; there is no
//! retry layer.

use std::sync::LazyLock;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::FetchError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("museline/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Blocking GET returning deserialized JSON.
///
/// `query` pairs are appended to the URL (the Harvard API key travels
/// this way). Non-200 statuses map to [`FetchError::Http`]; a body that
/// fails to deserialize maps to [`FetchError::Malformed`].
pub fn get_json<T: DeserializeOwned>(
    url: &str,
    query: &[(&str, String)],
) -> Result<T, FetchError> {
    let text = SHARED_RUNTIME.handle().block_on(async {
        let resp = http_client()
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::from_reqwest)?;
        resp.text().await.map_err(FetchError::from_reqwest)
    })?;

    serde_json::from_str(&text).map_err(|e| FetchError::malformed(e.to_string()))
}
