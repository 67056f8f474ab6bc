//! HTTP client factory
//!
//! Builds a `reqwest` client with a request timeout, an optional TLS
//! verification bypass and a per-host concurrency limit. The limit is
//! enforced with one semaphore per `host:port`, created on first use and
//! cached in a DashMap. A request holds its permit until the response
//! head arrives or the request fails.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::duration::Duration;
use crate::error::{FunksError, Result};
use crate::sync_map::map_size;

/// HTTP client with per-host connection limits
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: reqwest::Client,
    timeout: Duration,
    max_conns_per_host: usize,
    /// host:port → permits (lock-free lookup)
    host_permits: Arc<DashMap<String, Arc<Semaphore>>>,
}

/// Create a client without a connection limit
pub fn create_http_client(timeout: Duration, insecure_skip_verify: bool) -> Result<HttpClient> {
    create_http_client_with_limit(timeout, insecure_skip_verify, 0)
}

/// Create a client allowing at most `max_conns_per_host` in-flight requests
/// per host (`0` means unlimited)
pub fn create_http_client_with_limit(
    timeout: Duration,
    insecure_skip_verify: bool,
    max_conns_per_host: usize,
) -> Result<HttpClient> {
    HttpClient::from_config(&ClientConfig {
        timeout,
        insecure_skip_verify,
        max_conns_per_host,
        ..ClientConfig::default()
    })
}

impl HttpClient {
    /// Build a client from configuration
    ///
    /// A zero or negative timeout disables the request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(config.insecure_skip_verify);

        if let Some(timeout) = positive(config.timeout) {
            builder = builder.timeout(timeout);
        }
        if let Some(connect) = config.connect_timeout.and_then(positive) {
            builder = builder.connect_timeout(connect);
        }
        if config.max_conns_per_host > 0 {
            builder = builder.pool_max_idle_per_host(config.max_conns_per_host);
        }

        let inner = builder.build()?;
        debug!(
            timeout = %config.timeout,
            insecure_skip_verify = config.insecure_skip_verify,
            max_conns_per_host = config.max_conns_per_host,
            "HTTP client created"
        );

        Ok(Self {
            inner,
            timeout: config.timeout,
            max_conns_per_host: config.max_conns_per_host,
            host_permits: Arc::new(DashMap::new()),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured per-host limit (`0` = unlimited)
    pub fn max_conns_per_host(&self) -> usize {
        self.max_conns_per_host
    }

    /// Underlying reqwest client (bypasses the per-host limit)
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Number of hosts that currently have a limiter
    pub fn tracked_hosts(&self) -> usize {
        map_size(&self.host_permits)
    }

    /// Start a request; send it with [`HttpClient::execute`] to apply the limit
    pub fn request(&self, method: reqwest::Method, url: &str) -> Result<reqwest::RequestBuilder> {
        Ok(self.inner.request(method, parse_url(url)?))
    }

    /// GET `url`
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let request = self.request(reqwest::Method::GET, url)?.build()?;
        self.execute(request).await
    }

    /// Send a request, waiting for a free slot on its host first
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        let _permit = self.acquire(request.url()).await?;
        let response = self.inner.execute(request).await?;
        debug!(status = %response.status(), "response received");
        Ok(response)
    }

    async fn acquire(&self, url: &Url) -> Result<Option<OwnedSemaphorePermit>> {
        if self.max_conns_per_host == 0 {
            return Ok(None);
        }

        let key = host_key(url)?;
        // Entry guard is released at the end of this statement, before awaiting
        let semaphore = Arc::clone(
            &self
                .host_permits
                .entry(key)
                .or_insert_with(|| Arc::new(Semaphore::new(self.max_conns_per_host))),
        );

        // Host semaphores are never closed
        Ok(semaphore.acquire_owned().await.ok())
    }
}

fn positive(duration: Duration) -> Option<std::time::Duration> {
    duration.to_std().filter(|d| !d.is_zero())
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| FunksError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn host_key(url: &Url) -> Result<String> {
    let host = url.host_str().ok_or_else(|| FunksError::InvalidUrl {
        url: url.to_string(),
        reason: "missing host".to_string(),
    })?;
    let port = url.port_or_known_default().unwrap_or(0);
    Ok(format!("{}:{}", host, port))
}
