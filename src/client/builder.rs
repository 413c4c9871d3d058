use std::env;
use std::time::Duration;

use reqwest::Proxy;

use crate::client::core::ApiClient;
use crate::Result;

/// Builder for creating clients with custom transport configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    proxy: Option<String>,
}

impl ApiClientBuilder {
    /// Start a builder for the given base URL.
    ///
    /// The base URL is concatenated with request paths verbatim; trailing
    /// and leading slashes are the caller's responsibility.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            proxy: None,
        }
    }

    /// Set the per-request timeout. Defaults to `PF_HTTP_TIMEOUT_SECS`
    /// (seconds) from the environment, falling back to 30s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route requests through a proxy. Can also be supplied via
    /// `PF_PROXY_URL`.
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        // Minimal production-friendly defaults (env-overridable).
        let timeout = self
            .timeout
            .or_else(|| {
                env::var("PF_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs)
            })
            .unwrap_or(Duration::from_secs(30));

        // Cookie store on: the session rides on cookies, and every request
        // must carry them.
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true);

        let proxy_url = self.proxy.or_else(|| env::var("PF_PROXY_URL").ok());
        if let Some(proxy_url) = proxy_url {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let http = builder.build()?;
        Ok(ApiClient::from_parts(http, self.base_url))
    }
}
