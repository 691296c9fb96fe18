//! # JSON-RPC Frames
//!
//! Wire types for the MCP stdio transport: decoded inbound frames, and the
//! responses and notifications written back to the peer.
//!
//! Decoding is deliberately lax. Anything that parses as JSON becomes a
//! [`Frame`]; only the `id`, `method` and `params` members are looked at.

use serde::Serialize;
use serde_json::{Value, json};

// =============================================================================
// CONSTANTS
// =============================================================================

/// JSON-RPC version tag carried by every outbound frame.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision announced to the peer.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server identity announced to the peer.
pub const SERVER_NAME: &str = "graphiti-memory";
pub const SERVER_VERSION: &str = "1.0.0";

/// Method of the unsolicited startup notification.
pub const ANNOUNCE_METHOD: &str = "initialized";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;

/// Capabilities payload shared by the startup notification and the
/// `initialize` response.
pub fn capabilities() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

// =============================================================================
// INBOUND
// =============================================================================

/// One decoded line of input.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// `None` when the member is absent; an explicit `null` is `Some(Null)`.
    pub id: Option<Value>,
    /// Empty when the member is missing or not a string.
    pub method: String,
    pub params: Option<Value>,
}

impl Frame {
    /// Decode a single line. Fails only when the text is not JSON.
    pub fn decode(line: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(line)?;
        Ok(Self::from_value(value))
    }

    /// Pick the frame members out of an arbitrary JSON value.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut members) = value else {
            return Self {
                id: None,
                method: String::new(),
                params: None,
            };
        };

        let method = match members.remove("method") {
            Some(Value::String(method)) => method,
            _ => String::new(),
        };

        Self {
            id: members.remove("id"),
            method,
            params: members.remove("params"),
        }
    }

    /// A frame without an `id` expects no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn parse_error() -> Self {
        Self {
            code: PARSE_ERROR,
            message: "Parse error".to_string(),
        }
    }

    pub fn method_not_found() -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: "Method not found".to_string(),
        }
    }

    /// Internal error with the failure detail appended.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: format!("Internal error: {detail}"),
        }
    }
}

/// Response to a request frame. Exactly one of `result` / `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Answer to an unparseable line; the id cannot be recovered.
    pub fn parse_error() -> Self {
        Self::error(Value::Null, RpcError::parse_error())
    }
}

/// Unsolicited frame with no id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Value,
}

impl Notification {
    /// Startup announcement carrying [`capabilities`].
    pub fn announce() -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: ANNOUNCE_METHOD.to_string(),
            params: capabilities(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
