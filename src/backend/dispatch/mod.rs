//! Request Dispatch
//!
//! The single serialization point of the server. Every reader task feeds
//! raw lines into one unbounded FIFO queue; the one dispatcher task drains
//! it, runs the matching handler against the server state, and fans the
//! response out to every connected writer.
//!
//! # Ordering
//!
//! Lines from one connection keep their order (FIFO reader into FIFO
//! queue). Lines from different connections get whatever total order the
//! queue produces, but because a single task both applies the mutation and
//! enqueues the response to every writer in registration order, every
//! client observes the same global response order. That shared order is
//! what lets the document model's rebasing converge.

pub mod handlers;

use tokio::sync::mpsc;

use crate::backend::server::state::SharedState;

/// One raw request line, tagged with the connection that produced it.
#[derive(Debug, Clone)]
pub struct QueuedRequest {
    pub conn_id: u64,
    pub line: String,
}

/// Producer half of the request queue, cloned into every reader task.
pub type RequestTx = mpsc::UnboundedSender<QueuedRequest>;

/// Consumer half of the request queue; the dispatcher owns it.
pub type RequestRx = mpsc::UnboundedReceiver<QueuedRequest>;

/// Create the request queue.
pub fn request_queue() -> (RequestTx, RequestRx) {
    mpsc::unbounded_channel()
}

/// Drain the queue until every producer is gone.
///
/// Handler execution and the broadcast iteration happen under one
/// acquisition of the state lock, so a connection appearing or vanishing
/// mid-request cannot split the delivery order.
pub async fn run(mut queue: RequestRx, state: SharedState) {
    while let Some(request) = queue.recv().await {
        tracing::debug!(
            "[Dispatch] request from connection {}: {}",
            request.conn_id,
            request.line
        );
        let targeted = {
            let mut state = state.lock().unwrap();
            let response = handlers::handle(&mut state, &request);
            state.registry.broadcast(&response)
        };
        tracing::trace!("[Dispatch] response fanned out to {} writers", targeted);
    }
    tracing::debug!("[Dispatch] request queue closed, dispatcher exiting");
}
