//! Connection Tasks
//!
//! Each accepted socket gets two tasks. The reader owns the read half:
//! it pulls framed lines and enqueues them on the shared request queue,
//! tagged with the connection id. The writer owns the write half: it
//! drains the connection's response channel onto the socket, so a stalled
//! client only ever delays itself.
//!
//! The first thing a new connection receives is its `id&id=<n>&`
//! handshake, sent to that writer alone while the registration lock is
//! still held, so no broadcast can slip in front of it.
//!
//! EOF or a read error tears the connection down: the bound user (if any)
//! is force-logged out, the writer is deregistered, and both tasks end.
//! Nothing a single connection does can take the server down.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::backend::dispatch::{QueuedRequest, RequestTx};
use crate::backend::server::state::SharedState;
use crate::shared::protocol::response;

/// Serve one client connection until its socket closes.
pub async fn handle_connection(
    socket: TcpStream,
    conn_id: u64,
    state: SharedState,
    queue: RequestTx,
) {
    let peer = socket
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());
    tracing::info!("[Connection] {} accepted as connection {}", peer, conn_id);

    let (read_half, write_half) = socket.into_split();
    let (tx, rx) = mpsc::unbounded_channel::<String>();

    {
        let mut state = state.lock().unwrap();
        state.registry.register_writer(conn_id, tx);
        state.registry.send_to(conn_id, &response::id(conn_id));
    }

    tokio::spawn(write_loop(write_half, rx));
    read_loop(read_half, conn_id, &queue).await;

    let dropped_user = {
        let mut state = state.lock().unwrap();
        state.registry.disconnect(conn_id)
    };
    match dropped_user {
        Some(user) => tracing::info!(
            "[Connection] connection {} lost, '{}' force-logged out",
            conn_id,
            user
        ),
        None => tracing::info!("[Connection] connection {} closed", conn_id),
    }
}

async fn read_loop(socket: OwnedReadHalf, conn_id: u64, queue: &RequestTx) {
    let mut lines = BufReader::new(socket).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if queue.send(QueuedRequest { conn_id, line }).is_err() {
                    // dispatcher is gone, nothing left to serve
                    break;
                }
            }
            Ok(None) => break,
            Err(error) => {
                tracing::warn!(
                    "[Connection] read error on connection {}: {}",
                    conn_id,
                    error
                );
                break;
            }
        }
    }
}

async fn write_loop(mut socket: OwnedWriteHalf, mut responses: mpsc::UnboundedReceiver<String>) {
    while let Some(line) = responses.recv().await {
        if socket.write_all(line.as_bytes()).await.is_err() {
            break;
        }
        if socket.write_all(b"\n").await.is_err() {
            break;
        }
    }
}
