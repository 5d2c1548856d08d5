//! Server Initialization
//!
//! Assembles the running server: the shared state, the request queue, the
//! dispatcher task, and the accept loop that gives every connection a
//! monotonically increasing id and its own pair of tasks.
//!
//! # Initialization Process
//!
//! 1. Bind the listening socket (fatal on failure).
//! 2. Create the shared state and the unbounded request queue.
//! 3. Spawn the single dispatcher task.
//! 4. Accept connections forever, spawning the connection tasks.
//!
//! [`Server::bind`] and [`Server::serve`] are split so tests can bind an
//! ephemeral port and learn the actual address before serving.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::backend::connection;
use crate::backend::dispatch::{self, request_queue, RequestTx};
use crate::backend::error::ServerError;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::{shared_state, SharedState};

/// A bound server, ready to accept connections.
pub struct Server {
    listener: TcpListener,
    state: SharedState,
    queue: RequestTx,
}

impl Server {
    /// Bind the configured port and spawn the dispatcher.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(("127.0.0.1", config.port))
            .await
            .map_err(|source| ServerError::bind(config.port, source))?;

        let state = shared_state(config.palette.clone());
        let (queue, requests) = request_queue();
        tokio::spawn(dispatch::run(requests, state.clone()));

        tracing::info!("[Server] listening on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            state,
            queue,
        })
    }

    /// The address actually bound; port 0 in the config resolves here.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listening socket breaks.
    ///
    /// Individual connection failures are handled by the connection tasks
    /// and never end the loop; only a listener error returns.
    pub async fn serve(self) -> Result<(), ServerError> {
        let mut next_conn_id: u64 = 0;
        loop {
            let (socket, _) = self.listener.accept().await?;
            next_conn_id += 1;
            tokio::spawn(connection::handle_connection(
                socket,
                next_conn_id,
                self.state.clone(),
                self.queue.clone(),
            ));
        }
    }
}

/// Bind and serve in one call; never returns on the happy path.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    Server::bind(&config).await?.serve().await
}
