//! HTTP client abstraction for talking to the remote API.
//!
//! This module defines the `HttpClient` trait so the gateway can be exercised
//! in tests with a mock implementation instead of a live server.

use crate::config::GatewayConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// HTTP methods used by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request to the remote API.
///
/// The path is relative to the gateway's base URL; the body, when present,
/// is sent as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        ApiRequest {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: serde_json::Value) -> Self {
        ApiRequest {
            method: Method::Patch,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Response from an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

impl HttpResponse {
    /// The API contract treats exactly 200 as success; anything else is a
    /// rejection, including 404 on delete.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Trait for executing requests against the remote API.
///
/// Production uses `ReqwestHttpClient`; tests use `MockHttpClient` so the
/// whole synchronization contract can be asserted without a network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute a request and buffer the full response.
    ///
    /// # Errors
    /// Returns an error if the request fails at the transport level or times
    /// out. Non-200 statuses are NOT errors here; the gateway decides what a
    /// status means.
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest.
///
/// Owns the base URL and timeout; paths on `ApiRequest` are appended to the
/// base URL.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Create a client from the gateway configuration.
    pub fn new(config: &GatewayConfig) -> Self {
        ReqwestHttpClient {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        tracing::debug!(url = %url, "executing HTTP request");

        let mut req = self.client.request(method, &url).timeout(self.timeout);
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "HTTP request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status = status, response_len = body.len(), "HTTP request completed");

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Mock HTTP client for testing.
///
/// Responses are queued per "METHOD /path" key and returned in FIFO order.
/// Every executed request is recorded so tests can assert on exactly which
/// calls (and bodies) the gateway issued.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Vec<MockResponse>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    in_flight: Arc<AtomicUsize>,
}

/// A mock response that can optionally wait for a trigger before completing.
enum MockResponse {
    /// Immediate response
    Immediate(Result<HttpResponse>),
    /// Response that waits for a trigger signal before completing
    Triggered {
        response: Result<HttpResponse>,
        trigger: Arc<Mutex<Option<oneshot::Receiver<()>>>>,
    },
}

/// Record of a call made to the mock HTTP client.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client with no configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a "METHOD /path" key.
    pub fn add_response(&self, key: &str, response: Result<HttpResponse>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(MockResponse::Immediate(response));
    }

    /// Queue a successful 200 response with the given JSON body.
    pub fn add_ok(&self, key: &str, body: serde_json::Value) {
        self.add_response(
            key,
            Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }),
        );
    }

    /// Queue a response that waits for a manual trigger before completing.
    ///
    /// Returns a sender; the blocked request completes when `()` is sent (or
    /// the sender is dropped). Used to interleave requests in tests.
    pub fn add_response_with_trigger(
        &self,
        key: &str,
        response: Result<HttpResponse>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(MockResponse::Triggered {
                response,
                trigger: Arc::new(Mutex::new(Some(rx))),
            });
        tx
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Clear the recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of requests currently executing.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard {
            in_flight: self.in_flight.clone(),
        };

        self.calls.lock().push(RecordedCall {
            method: request.method.as_str().to_string(),
            path: request.path.clone(),
            body: request.body.clone(),
        });

        let key = format!("{} {}", request.method, request.path);
        let mock_response = {
            let mut responses = self.responses.lock();
            match responses.get_mut(&key) {
                Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                _ => None,
            }
        };

        match mock_response {
            Some(MockResponse::Immediate(response)) => response,
            Some(MockResponse::Triggered { response, trigger }) => {
                let rx = trigger.lock().take();
                if let Some(rx) = rx {
                    // Wait for the trigger (proceed either way if dropped)
                    let _ = rx.await;
                }
                response
            }
            None => Err(crate::error::FeedeskError::Other(anyhow::anyhow!(
                "no mock response configured for {}",
                key
            ))),
        }
    }
}

/// Guard that decrements the in-flight counter when dropped, so the count is
/// right even if the task is cancelled or panics.
struct InFlightGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
