//! # graphiti-bridge-core
//!
//! Adapts the MCP stdio transport (newline-delimited JSON-RPC 2.0) to the
//! Graphiti HTTP tool backend.
//!
//! ## Pipeline
//!
//! input bytes → line reassembly → per-line JSON decode → method dispatch →
//! (optional) HTTP call → response encode → output bytes
//!
//! ## Boundaries
//!
//! - No signal handling and no ownership of stdin/stdout: the host binary
//!   passes a reader and a writer in and decides when to stop.
//! - One frame in flight at a time; output order equals input order.
//! - Nothing survives between frames except the unterminated line fragment.

// =============================================================================
// MODULES
// =============================================================================

pub mod bridge;
pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod reassembler;
pub mod remote;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use bridge::Bridge;
pub use catalog::{ToolDescriptor, builtin_tools, builtin_tools_value};
pub use config::{BridgeConfig, ConfigOverrides, FileConfig};
pub use dispatcher::{Dispatcher, TOOL_FAILURE_CODE};
pub use error::{BridgeError, DispatchError, RemoteError};
pub use protocol::{Frame, Notification, Response, RpcError, capabilities};
pub use reassembler::LineReassembler;
pub use remote::{HttpBackend, RemoteCall, RemoteMethod, ToolBackend};
