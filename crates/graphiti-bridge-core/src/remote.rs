//! # Remote Call Adapter
//!
//! One HTTP request per call against the Graphiti tool backend:
//!
//! - `GET  <base>/tools/list`
//! - `POST <base>/tools/call` with body `{name, arguments}`
//!
//! No retries. The client-side timeout is the only bound on a call.

use crate::config::BridgeConfig;
use crate::error::{BridgeError, RemoteError};
use serde_json::Value;
use std::future::Future;

pub const TOOLS_LIST_PATH: &str = "/tools/list";
pub const TOOLS_CALL_PATH: &str = "/tools/call";

// =============================================================================
// REMOTE CALL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteMethod {
    Get,
    Post,
}

/// A `(path, method, body?)` request to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCall {
    pub method: RemoteMethod,
    pub path: &'static str,
    pub body: Option<Value>,
}

impl RemoteCall {
    pub fn list_tools() -> Self {
        Self {
            method: RemoteMethod::Get,
            path: TOOLS_LIST_PATH,
            body: None,
        }
    }

    pub fn call_tool(body: Value) -> Self {
        Self {
            method: RemoteMethod::Post,
            path: TOOLS_CALL_PATH,
            body: Some(body),
        }
    }
}

/// Anything that can execute a [`RemoteCall`].
pub trait ToolBackend {
    /// Perform the call, yielding the decoded JSON body of a 2xx answer.
    fn execute(&self, call: RemoteCall) -> impl Future<Output = Result<Value, RemoteError>> + Send;
}

// =============================================================================
// HTTP BACKEND
// =============================================================================

/// [`ToolBackend`] over HTTP/1.1 JSON.
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client with the configured address and timeout.
    pub fn new(config: &BridgeConfig) -> Result<Self, BridgeError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BridgeError::HttpClient(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a JSON request for the given path.
    fn request(&self, method: RemoteMethod, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let method = match method {
            RemoteMethod::Get => reqwest::Method::GET,
            RemoteMethod::Post => reqwest::Method::POST,
        };
        self.http
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// Send a request and classify transport failures.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, RemoteError> {
        req.send().await.map_err(classify)
    }

    /// Check the status and decode the body.
    ///
    /// The body is read as text first so both failure kinds can carry it.
    async fn handle_response(&self, resp: reqwest::Response) -> Result<Value, RemoteError> {
        let status = resp.status();
        let body = resp.text().await.map_err(classify)?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|_| RemoteError::InvalidResponse(body))
    }
}

impl ToolBackend for HttpBackend {
    async fn execute(&self, call: RemoteCall) -> Result<Value, RemoteError> {
        let mut req = self.request(call.method, call.path);
        if let Some(body) = &call.body {
            req = req.json(body);
        }

        tracing::debug!(path = call.path, method = ?call.method, "remote call");
        let resp = self.send(req).await?;
        self.handle_response(resp).await
    }
}

/// Map a reqwest failure onto the timeout / network split.
fn classify(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::Network(err.to_string())
    }
}
