//! # Error Types
//!
//! Three layers of failure, kept apart because they surface differently:
//!
//! - [`RemoteError`]: the HTTP backend did not give a usable answer. The
//!   dispatcher decides per method whether to fall back or embed it.
//! - [`DispatchError`]: a recognized method could not be carried out. Always
//!   answered with JSON-RPC `-32603`.
//! - [`BridgeError`]: the bridge itself cannot continue (stream I/O,
//!   configuration). Only these reach the host process.

use thiserror::Error;

// =============================================================================
// REMOTE CALL ERRORS
// =============================================================================

/// Failure of a single call to the HTTP tool backend.
///
/// The four kinds are told apart by their message text; peers see the
/// rendered message inside a `tools/call` result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered 2xx but the body is not JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidResponse(String),

    /// No complete answer within the configured bound; the request was aborted.
    #[error("Request timeout")]
    Timeout,

    /// Connection-level failure (refused, reset, DNS, ...).
    #[error("Network error: {0}")]
    Network(String),
}

// =============================================================================
// DISPATCH ERRORS
// =============================================================================

/// A recognized method failed before or outside its remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// `tools/call` arrived without `params`.
    #[error("tools/call requires params")]
    MissingParams,

    /// `params` is present but not a JSON object.
    #[error("tools/call params must be an object")]
    ParamsNotObject,
}

// =============================================================================
// BRIDGE ERRORS
// =============================================================================

/// Errors that stop the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Reading the input stream or writing the output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An outbound frame could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Invalid configuration value or unreadable configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_messages_are_distinguishable() {
        let status = RemoteError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(status.to_string(), "HTTP 500: boom");
        assert_eq!(
            RemoteError::InvalidResponse("<html>".to_string()).to_string(),
            "Invalid JSON response: <html>"
        );
        assert_eq!(RemoteError::Timeout.to_string(), "Request timeout");
        assert_eq!(
            RemoteError::Network("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
    }

    #[test]
    fn io_errors_convert_into_bridge_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "peer gone");
        let err: BridgeError = io.into();
        assert!(matches!(err, BridgeError::Io(_)));
        assert!(err.to_string().contains("peer gone"));
    }
}
