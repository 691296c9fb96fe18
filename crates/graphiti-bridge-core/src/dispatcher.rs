//! # Method Dispatcher
//!
//! Maps a decoded [`Frame`] to at most one [`Response`].
//!
//! | method                      | answer                                         |
//! |-----------------------------|------------------------------------------------|
//! | `initialize`                | fixed capabilities, no remote call             |
//! | `tools/list`                | remote list, or the built-in catalog           |
//! | `tools/call`                | remote result, or an embedded `{error}` result |
//! | `notifications/initialized` | nothing                                        |
//! | anything else               | `-32601` Method not found                      |
//!
//! Frames without an `id` never get an answer.

use crate::catalog::builtin_tools_value;
use crate::error::DispatchError;
use crate::protocol::{Frame, Response, RpcError, capabilities};
use crate::remote::{RemoteCall, ToolBackend};
use serde_json::{Map, Value, json};

/// Code carried by tool failures embedded in a `tools/call` result.
pub const TOOL_FAILURE_CODE: i32 = -1;

pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_TOOLS_LIST: &str = "tools/list";
pub const METHOD_TOOLS_CALL: &str = "tools/call";
pub const METHOD_INITIALIZED: &str = "notifications/initialized";

/// Stateless per-frame dispatcher over a [`ToolBackend`].
pub struct Dispatcher<B> {
    backend: B,
}

impl<B: ToolBackend> Dispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Handle one frame; `None` means nothing is written back.
    pub async fn dispatch(&self, frame: Frame) -> Option<Response> {
        let Frame { id, method, params } = frame;

        let Some(id) = id else {
            tracing::debug!(method = %method, "notification discarded");
            return None;
        };

        // Acknowledged silently even when it carries an id.
        if method == METHOD_INITIALIZED {
            tracing::debug!("client initialized");
            return None;
        }

        let outcome = match method.as_str() {
            METHOD_INITIALIZE => Ok(capabilities()),
            METHOD_TOOLS_LIST => Ok(self.list_tools().await),
            METHOD_TOOLS_CALL => self.call_tool(params).await,
            _ => {
                tracing::debug!(method = %method, "method not found");
                return Some(Response::error(id, RpcError::method_not_found()));
            }
        };

        Some(match outcome {
            Ok(result) => Response::success(id, result),
            Err(e) => {
                tracing::warn!(method = %method, error = %e, "dispatch failed");
                Response::error(id, RpcError::internal(e))
            }
        })
    }

    /// `{tools}` from the backend, or the built-in catalog on any failure.
    async fn list_tools(&self) -> Value {
        match self.backend.execute(RemoteCall::list_tools()).await {
            Ok(body) => {
                let tools = match body.get("tools") {
                    Some(tools) if is_truthy(tools) => tools.clone(),
                    _ => Value::Array(Vec::new()),
                };
                json!({ "tools": tools })
            }
            Err(e) => {
                tracing::warn!(error = %e, "tools/list unavailable, serving built-in catalog");
                json!({ "tools": builtin_tools_value() })
            }
        }
    }

    /// Forward to the backend; failures become an `{error}` result.
    async fn call_tool(&self, params: Option<Value>) -> Result<Value, DispatchError> {
        let call = RemoteCall::call_tool(tool_call_body(params)?);

        match self.backend.execute(call).await {
            Ok(body) => Ok(match body.get("result") {
                Some(result) if !result.is_null() => result.clone(),
                _ => body,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "tools/call failed");
                Ok(json!({
                    "error": {
                        "code": TOOL_FAILURE_CODE,
                        "message": e.to_string(),
                    }
                }))
            }
        }
    }
}

/// The `tools/call` request body: `params` as received, with `arguments`
/// defaulted to `{}` when absent.
fn tool_call_body(params: Option<Value>) -> Result<Value, DispatchError> {
    let mut params = match params {
        None | Some(Value::Null) => return Err(DispatchError::MissingParams),
        Some(Value::Object(params)) => params,
        Some(_) => return Err(DispatchError::ParamsNotObject),
    };

    if !params.contains_key("arguments") {
        params.insert("arguments".to_string(), Value::Object(Map::new()));
    }

    Ok(Value::Object(params))
}

/// Members the backend may leave empty: `null`, `false`, `0` and `""` count
/// as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// =============================================================================
// TESTS
// =============================================================================
