//! Request descriptors and the retry-driving querier.

use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio_stream::Stream;
use tracing::{debug, instrument, warn};

use crate::{
    config::{RetryPolicy, ScryfallConfig},
    error::{Error, ErrorState},
};

/// One logical request: method, target, query parameters, optional body.
///
/// Immutable once built; a descriptor identifies exactly one page of a list
/// or one non-list object.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    target: Target,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
enum Target {
    /// Path relative to the configured API base.
    Path(String),
    /// Absolute URL, e.g. a `next_page` continuation link.
    Url(String),
}

impl Request {
    /// GET a path under the API base.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            target: Target::Path(path.into()),
            query: Vec::new(),
            body: None,
        }
    }

    /// POST a JSON body to a path under the API base.
    #[must_use]
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            target: Target::Path(path.into()),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// GET an absolute URL, as handed back in a continuation link.
    #[must_use]
    pub fn get_url(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            target: Target::Url(url.into()),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    fn route(&self) -> &str {
        match &self.target {
            Target::Path(path) => path,
            Target::Url(url) => url,
        }
    }
}

/// Asynchronous Scryfall API client.
///
/// Cheap to clone; clones share the HTTP pool, the retry policy and the
/// last-error slot.
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    api_url: String,
    retry: Mutex<RetryPolicy>,
    last_error: ErrorState,
}

impl ScryfallClient {
    /// Create a client with the default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> crate::Result<Self> {
        Self::with_config(ScryfallConfig::default())
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: ScryfallConfig) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("scryfall-rs/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                api_url: config.api_url.trim_end_matches('/').to_string(),
                retry: Mutex::new(config.retry),
                last_error: ErrorState::default(),
            }),
        })
    }

    /// Set the retry attempt budget and fixed delay, keeping other knobs.
    pub fn set_retry(&self, attempts: u32, delay_ms: u64) {
        let mut policy = self.lock_retry();
        policy.attempts = attempts;
        policy.delay_ms = delay_ms;
    }

    /// Replace the whole retry policy.
    pub fn set_retry_policy(&self, policy: RetryPolicy) {
        *self.lock_retry() = policy;
    }

    /// The retry policy currently in effect.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.lock_retry().clone()
    }

    /// The most recent terminal failure, if the last finished query failed.
    ///
    /// The slot is shared by every clone of this client and overwritten by
    /// each finished query, so read it immediately after the call you care
    /// about. Under concurrent queries the last one to *finish* wins and
    /// attribution is unreliable; prefer [`ScryfallClient::request`] there.
    #[must_use]
    pub fn last_error(&self) -> Option<Arc<Error>> {
        self.inner.last_error.get()
    }

    /// Run a query, resolving to the decoded value or `None`.
    ///
    /// Failures are not raised: the terminal error is recorded in the
    /// last-error slot and the call resolves to `None`. A success clears
    /// the slot. Exactly one slot write happens per call.
    pub async fn query<T: DeserializeOwned>(&self, request: Request) -> Option<T> {
        self.request(request).await.ok()
    }

    /// Run a query, resolving to the decoded value or the terminal error.
    ///
    /// Same retry loop and slot bookkeeping as [`ScryfallClient::query`],
    /// with the error also returned for callers that need attribution.
    #[instrument(skip(self, request), fields(route = request.route()))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> std::result::Result<T, Arc<Error>> {
        let policy = self.retry_policy();
        let attempts = policy.attempts.max(1);
        let mut attempt = 0;

        let outcome = loop {
            attempt += 1;
            debug!(attempt, method = %request.method, "sending api request");

            let sent = self.send(&request).await;
            let result = if policy.forced {
                Err(Error::RetriesExhausted { attempts })
            } else {
                sent
            };

            match result {
                Ok(value) => break Ok(value),
                Err(e) if policy.forced || e.is_retryable() => {
                    warn!(
                        attempt,
                        delay_ms = policy.delay_ms,
                        error = %e,
                        "request failed, backing off"
                    );
                    tokio::time::sleep(policy.delay()).await;
                    if attempt >= attempts {
                        break Err(e);
                    }
                }
                Err(e) => break Err(e),
            }
        };

        match outcome {
            Ok(value) => {
                self.inner.last_error.clear();
                Ok(value)
            }
            Err(e) => {
                let e = Arc::new(e);
                self.inner.last_error.set(Arc::clone(&e));
                Err(e)
            }
        }
    }

    /// GET a raw byte stream from an absolute URL (bulk snapshot files).
    ///
    /// Shares the last-error bookkeeping of [`ScryfallClient::query`] but
    /// not its retry loop; snapshot downloads are large one-shot transfers.
    pub(crate) async fn stream_bytes(
        &self,
        url: &str,
    ) -> std::result::Result<impl Stream<Item = reqwest::Result<Bytes>>, Arc<Error>> {
        match self.open_stream(url).await {
            Ok(stream) => {
                self.inner.last_error.clear();
                Ok(stream)
            }
            Err(e) => {
                let e = Arc::new(e);
                self.inner.last_error.set(Arc::clone(&e));
                Err(e)
            }
        }
    }

    async fn open_stream(
        &self,
        url: &str,
    ) -> std::result::Result<impl Stream<Item = reqwest::Result<Bytes>>, Error> {
        let response = self.inner.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await?;
            return Err(parse_error_body(status, &bytes));
        }
        Ok(response.bytes_stream())
    }

    async fn send<T: DeserializeOwned>(&self, request: &Request) -> std::result::Result<T, Error> {
        let url = match &request.target {
            Target::Path(path) => format!("{}/{}", self.inner.api_url, path),
            Target::Url(url) => url.clone(),
        };

        let mut builder = self.inner.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(parse_error_body(status, &bytes))
        }
    }

    fn lock_retry(&self) -> std::sync::MutexGuard<'_, RetryPolicy> {
        self.inner.retry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Map a non-success response onto [`Error::Api`].
///
/// The API reports failures as `{object: "error", status, code, details}`;
/// anything that does not parse falls back to the raw body text.
fn parse_error_body(status: StatusCode, bytes: &Bytes) -> Error {
    #[derive(serde::Deserialize, Default)]
    struct WireError {
        #[serde(default)]
        status: Option<u16>,
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        details: Option<String>,
    }

    let wire: WireError = serde_json::from_slice(bytes).unwrap_or_default();

    Error::Api {
        status: wire.status.unwrap_or_else(|| status.as_u16()),
        code: wire.code.unwrap_or_else(|| "unknown".into()),
        details: wire
            .details
            .unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned()),
    }
}
