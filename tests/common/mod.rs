//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! an ephemeral-port server harness, a line-speaking test client, and
//! custom assertion macros.

#![allow(dead_code)]

pub mod assertions;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;

use xfpad::backend::server::{Server, ServerConfig};

/// How long a test waits for any single response line.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A server bound to an ephemeral port, serving in the background for the
/// lifetime of the test runtime.
pub struct TestServer {
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Self {
        let server = Server::bind(&ServerConfig::new(0))
            .await
            .expect("bind test server");
        let addr = server.local_addr().expect("test server local addr");
        tokio::spawn(async move {
            let _ = server.serve().await;
        });
        Self { addr }
    }

    pub async fn connect(&self) -> TestClient {
        TestClient::connect(self.addr).await
    }
}

/// One client connection. Consumes the `id` handshake on connect and
/// remembers the assigned connection id.
pub struct TestClient {
    writer: OwnedWriteHalf,
    lines: Lines<BufReader<OwnedReadHalf>>,
    pub conn_id: u64,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let socket = TcpStream::connect(addr).await.expect("connect to server");
        let (read_half, write_half) = socket.into_split();
        let mut client = Self {
            writer: write_half,
            lines: BufReader::new(read_half).lines(),
            conn_id: 0,
        };
        let greeting = client.recv_line().await;
        client.conn_id = greeting
            .strip_prefix("id&id=")
            .and_then(|rest| rest.strip_suffix('&'))
            .and_then(|id| id.parse().ok())
            .unwrap_or_else(|| panic!("unexpected handshake line: {greeting:?}"));
        client
    }

    /// Send one request line.
    pub async fn send(&mut self, line: &str) {
        self.writer
            .write_all(line.as_bytes())
            .await
            .expect("write request");
        self.writer.write_all(b"\n").await.expect("write newline");
    }

    /// Receive the next response line, failing the test on timeout or EOF.
    pub async fn recv_line(&mut self) -> String {
        timeout(RECV_TIMEOUT, self.lines.next_line())
            .await
            .expect("timed out waiting for a response line")
            .expect("read from server")
            .expect("server closed the connection")
    }

    /// Receive lines until the `enddocinfo` terminator, inclusive.
    pub async fn recv_listing(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let line = self.recv_line().await;
            let done = line.starts_with("enddocinfo&");
            lines.push(line);
            if done {
                return lines;
            }
        }
    }

    /// Log in and drain the whole reply. Returns every line received,
    /// starting with `loggedin` or `notloggedin`.
    pub async fn login(&mut self, user: &str) -> Vec<String> {
        self.send(&format!("LOGIN&userName={user}&")).await;
        let first = self.recv_line().await;
        if first.starts_with("notloggedin&") {
            return vec![first];
        }
        let mut lines = vec![first];
        lines.extend(self.recv_listing().await);
        lines
    }
}
