//! # Protocol Bridge
//!
//! Ties the pieces together:
//!
//! ```text
//! bytes ─▶ LineReassembler ─▶ Frame::decode ─▶ Dispatcher ─▶ ToolBackend
//!                                                  │
//! writer ◀──────────── one JSON line per frame ◀───┘
//! ```
//!
//! Each completed line is fully answered, remote call included, before the
//! next one is looked at, so output order equals input order.

use crate::config::BridgeConfig;
use crate::dispatcher::Dispatcher;
use crate::error::BridgeError;
use crate::protocol::{Frame, Notification, Response};
use crate::reassembler::LineReassembler;
use crate::remote::{HttpBackend, ToolBackend};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Stateful bridge: one pending-fragment buffer, one output stream.
pub struct Bridge<B, W> {
    reassembler: LineReassembler,
    dispatcher: Dispatcher<B>,
    writer: W,
}

impl<W: AsyncWrite + Unpin> Bridge<HttpBackend, W> {
    /// Bridge to the HTTP backend described by `config`.
    pub fn from_config(config: &BridgeConfig, writer: W) -> Result<Self, BridgeError> {
        Ok(Self::new(HttpBackend::new(config)?, writer))
    }
}

impl<B: ToolBackend, W: AsyncWrite + Unpin> Bridge<B, W> {
    pub fn new(backend: B, writer: W) -> Self {
        Self {
            reassembler: LineReassembler::new(),
            dispatcher: Dispatcher::new(backend),
            writer,
        }
    }

    /// Emit the unsolicited capabilities notification.
    ///
    /// Call once, before feeding any input.
    pub async fn announce(&mut self) -> Result<(), BridgeError> {
        self.write_frame(&Notification::announce()).await
    }

    /// Consume one chunk of input, answering every line it completes.
    ///
    /// Returns the number of lines processed.
    pub async fn feed(&mut self, chunk: &[u8]) -> Result<usize, BridgeError> {
        let lines = self.reassembler.push(chunk);
        let count = lines.len();
        for line in lines {
            self.process_line(&line).await?;
        }
        Ok(count)
    }

    /// End of input: drop any unterminated fragment and flush.
    pub async fn shutdown(&mut self) -> Result<(), BridgeError> {
        let dropped = self.reassembler.finish();
        if dropped > 0 {
            tracing::debug!(bytes = dropped, "discarding unterminated input fragment");
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Announce, then pump `reader` until end of stream.
    pub async fn run<R: AsyncRead + Unpin>(&mut self, mut reader: R) -> Result<(), BridgeError> {
        self.announce().await?;

        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            self.feed(&buf[..n]).await?;
        }

        tracing::info!("input closed");
        self.shutdown().await
    }

    /// Bytes received but not yet terminated by a newline.
    pub fn pending_len(&self) -> usize {
        self.reassembler.pending_len()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    async fn process_line(&mut self, line: &[u8]) -> Result<(), BridgeError> {
        let frame = std::str::from_utf8(line)
            .ok()
            .and_then(|text| Frame::decode(text.trim()).ok());

        let Some(frame) = frame else {
            tracing::debug!(bytes = line.len(), "unparseable line");
            return self.write_frame(&Response::parse_error()).await;
        };

        tracing::debug!(method = %frame.method, notification = frame.is_notification(), "frame");
        match self.dispatcher.dispatch(frame).await {
            Some(response) => self.write_frame(&response).await,
            None => Ok(()),
        }
    }

    /// One JSON document, one newline, flushed immediately.
    async fn write_frame<T: Serialize>(&mut self, frame: &T) -> Result<(), BridgeError> {
        let mut line = serde_json::to_vec(frame)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::remote::RemoteCall;
    use serde_json::{Value, json};

    /// Backend that is never reachable.
    struct Offline;

    impl ToolBackend for Offline {
        async fn execute(&self, _call: RemoteCall) -> Result<Value, RemoteError> {
            Err(RemoteError::Network("offline".into()))
        }
    }

    fn output(bridge: Bridge<Offline, Vec<u8>>) -> Vec<Value> {
        let bytes = bridge.into_writer();
        String::from_utf8(bytes)
            .expect("utf8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect()
    }

    #[tokio::test]
    async fn announce_writes_notification_line() {
        let mut bridge = Bridge::new(Offline, Vec::new());
        bridge.announce().await.expect("announce");

        let frames = output(bridge);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["method"], "initialized");
        assert_eq!(frames[0]["params"]["serverInfo"]["version"], "1.0.0");
    }

    #[tokio::test]
    async fn feed_answers_only_completed_lines() {
        let mut bridge = Bridge::new(Offline, Vec::new());

        let n = bridge
            .feed(br#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#)
            .await
            .expect("feed");
        assert_eq!(n, 0);
        assert!(bridge.pending_len() > 0);

        let n = bridge.feed(b"\n").await.expect("feed");
        assert_eq!(n, 1);
        assert_eq!(bridge.pending_len(), 0);

        let frames = output(bridge);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["id"], 1);
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_parse_error() {
        let mut bridge = Bridge::new(Offline, Vec::new());
        bridge.feed(b"\xff\xfe\n").await.expect("feed");

        let frames = output(bridge);
        assert_eq!(
            frames,
            vec![json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32700, "message": "Parse error"}})]
        );
    }

    #[tokio::test]
    async fn carriage_return_before_newline_is_tolerated() {
        let mut bridge = Bridge::new(Offline, Vec::new());
        bridge
            .feed(b"{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"initialize\"}\r\n")
            .await
            .expect("feed");

        let frames = output(bridge);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].get("result").is_some());
    }

    #[tokio::test]
    async fn run_announces_then_drops_trailing_fragment() {
        let mut bridge = Bridge::new(Offline, Vec::new());
        let input: &[u8] = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n{\"id\":2,";
        bridge.run(input).await.expect("run");
        assert_eq!(bridge.pending_len(), 0);

        let frames = output(bridge);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["method"], "initialized");
        assert_eq!(frames[1]["id"], 1);
    }
}
