/**
 * Client Session Loops
 *
 * Each WebSocket connection runs two tasks:
 *
 * - the **read loop** decodes inbound frames into sync messages and hands
 *   them to the protocol handler; it stops on the first undecodable frame or
 *   transport error
 * - the **write loop** drains the session's outbound queue onto the socket,
 *   bounding every write with a timeout; it stops when the queue closes or a
 *   write fails
 *
 * The two tasks share nothing but the queue (through the hub) and the two
 * halves of the socket. When either one stops, the other is stopped too and
 * the session is unregistered from the hub; unregistering is idempotent, so
 * the order in which the loops end does not matter.
 */

use std::fmt::Display;
use std::time::Duration;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;

use crate::backend::collab::protocol::SyncProtocolHandler;
use crate::backend::realtime::{OutboundFrame, SessionKey};
use crate::shared::SyncMessage;

/// State owned by a connection's read loop
#[derive(Debug, Clone)]
pub struct ClientSession {
    key: SessionKey,
    last_known_version: i64,
}

impl ClientSession {
    /// Create the session state for a registered connection
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            last_known_version: 0,
        }
    }

    /// Identity of this session
    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Highest version seen in any message from this client
    pub fn last_known_version(&self) -> i64 {
        self.last_known_version
    }

    /// Record the version carried by an inbound message
    pub fn observe(&mut self, msg: &SyncMessage) {
        self.last_known_version = self.last_known_version.max(msg.version);
    }

    /// Drive the connection until either side stops, then unregister
    pub async fn run(
        self,
        socket: WebSocket,
        outbound: mpsc::Receiver<OutboundFrame>,
        handler: SyncProtocolHandler,
        write_timeout: Duration,
    ) {
        let key = self.key.clone();
        let (sink, stream) = socket.split();

        let mut write_task = tokio::spawn(write_loop(sink, outbound, write_timeout, key.clone()));
        let mut read_task = tokio::spawn(read_loop(stream, self, handler.clone()));

        tokio::select! {
            _ = &mut read_task => {
                // Closing the queue lets the write loop flush and send Close
                handler.hub().unregister(&key).await;
                let _ = write_task.await;
            }
            _ = &mut write_task => {
                read_task.abort();
                handler.hub().unregister(&key).await;
            }
        }

        tracing::info!("[Session] Client {} disconnected from document {}", key.id, key.doc_id);
    }
}

/// Decode inbound frames and dispatch them until the stream ends or fails
pub async fn read_loop<S, E>(
    mut stream: S,
    mut session: ClientSession,
    handler: SyncProtocolHandler,
) -> ClientSession
where
    S: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    while let Some(frame) = stream.next().await {
        let decoded = match frame {
            Ok(Message::Text(text)) => SyncMessage::decode(text.as_str().as_bytes()),
            Ok(Message::Binary(data)) => SyncMessage::decode(&data),
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
            Ok(Message::Close(_)) => {
                tracing::debug!("[Session] Client {} sent close", session.key.id);
                break;
            }
            Err(e) => {
                tracing::debug!("[Session] Read error for client {}: {}", session.key.id, e);
                break;
            }
        };

        let msg = match decoded {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("[Session] Closing client {}: {}", session.key.id, e);
                break;
            }
        };

        session.observe(&msg);
        if let Err(e) = handler.dispatch(&session.key, msg).await {
            tracing::warn!("[Session] Request from client {} failed: {}", session.key.id, e);
        }
    }
    session
}

/// Write queued frames to the client until the queue closes or a write fails
pub async fn write_loop<S>(
    mut sink: S,
    mut outbound: mpsc::Receiver<OutboundFrame>,
    write_timeout: Duration,
    key: SessionKey,
) where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    while let Some(frame) = outbound.recv().await {
        let message = match frame {
            OutboundFrame::Reply(text) => Message::Text(text.into()),
            OutboundFrame::Payload(bytes) => Message::Binary(bytes),
        };
        match tokio::time::timeout(write_timeout, sink.send(message)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!("[Session] Write to client {} failed: {}", key.id, e);
                return;
            }
            Err(_) => {
                tracing::warn!(
                    "[Session] Write to client {} timed out after {:?}",
                    key.id,
                    write_timeout
                );
                return;
            }
        }
    }

    let _ = tokio::time::timeout(write_timeout, sink.send(Message::Close(None))).await;
}
