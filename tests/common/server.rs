//! In-process server and WebSocket client helpers

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use docsync::backend::server::create_app_with_store;
use docsync::backend::store::{DocumentStore, MemoryDocumentStore};
use docsync::shared::{Document, ServerConfig, SyncMessage};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// Client side of a sync session
pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long a test waits for a frame before giving up
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Server running on 127.0.0.1 with an in-memory store
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<MemoryDocumentStore>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let app = create_app_with_store(config, store.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no local address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, store, handle }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("ws://{}{}", self.addr, path_and_query)
    }

    /// Open a session on `doc_id` as `client_id`
    pub async fn connect(&self, doc_id: &str, client_id: &str) -> WsClient {
        let url = self.url(&format!("/ws?docId={doc_id}&clientId={client_id}"));
        let (ws, _) = tokio_tungstenite::connect_async(url)
            .await
            .expect("ws connect");
        ws
    }

    /// Poll the store until `doc_id` reaches `version`
    pub async fn wait_for_version(&self, doc_id: &str, version: i64) -> Document {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            if let Some(doc) = self.store.get(doc_id).await.expect("store get") {
                if doc.version >= version {
                    return doc;
                }
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "{doc_id} never reached v{version}"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn send(ws: &mut WsClient, msg: &SyncMessage) {
    let text = msg.encode().expect("encode");
    ws.send(Message::Text(text.into())).await.expect("ws send");
}

/// Next data or close frame; `None` if the stream ended or timed out
pub async fn next_frame(ws: &mut WsClient) -> Option<Message> {
    loop {
        match tokio::time::timeout(RECV_TIMEOUT, ws.next()).await {
            Ok(Some(Ok(Message::Ping(_)))) | Ok(Some(Ok(Message::Pong(_)))) => continue,
            Ok(Some(Ok(msg))) => return Some(msg),
            _ => return None,
        }
    }
}

/// Next frame, which must be a protocol reply
pub async fn recv_reply(ws: &mut WsClient) -> SyncMessage {
    match next_frame(ws).await {
        Some(Message::Text(text)) => SyncMessage::decode(text.as_bytes()).expect("decode reply"),
        other => panic!("expected a text reply, got {other:?}"),
    }
}

/// Whether the server has closed this session
pub async fn is_closed(ws: &mut WsClient) -> bool {
    matches!(next_frame(ws).await, None | Some(Message::Close(_)))
}

/// Assert nothing arrives within `wait`
pub async fn assert_silent(ws: &mut WsClient, wait: Duration) {
    if let Ok(Some(frame)) = tokio::time::timeout(wait, ws.next()).await {
        panic!("unexpected frame: {frame:?}");
    }
}
