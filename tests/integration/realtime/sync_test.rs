//! Sync protocol over real WebSocket connections

use std::time::Duration;

use bytes::Bytes;
use docsync::backend::store::DocumentStore;
use docsync::shared::{Document, MessageType, ServerConfig, SyncMessage};
use futures_util::SinkExt;
use pretty_assertions::assert_eq;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::common::*;

#[tokio::test]
async fn test_first_sync_creates_document_and_acks() {
    let server = TestServer::start().await;
    let mut a = server.connect("doc1", "a").await;

    send(&mut a, &SyncMessage::sync("doc1", 0, None)).await;
    let reply = recv_reply(&mut a).await;

    assert_eq!(reply.msg_type, MessageType::SyncAck);
    assert_eq!(reply.version, 0);
    assert_eq!(reply.doc_id, "doc1");
    assert_eq!(reply.client_id, "a");
    assert!(server.store.get("doc1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_update_reaches_peer_but_not_sender() {
    let server = TestServer::start().await;
    let mut a = server.connect("doc1", "a").await;
    send(&mut a, &SyncMessage::sync("doc1", 0, None)).await;
    recv_reply(&mut a).await;

    let mut b = server.connect("doc1", "b").await;
    send(&mut b, &SyncMessage::sync("doc1", 0, None)).await;
    recv_reply(&mut b).await;

    send(&mut b, &SyncMessage::update("doc1", 1, Bytes::from_static(b"hello"))).await;

    match next_frame(&mut a).await {
        Some(Message::Binary(payload)) => assert_eq!(&payload[..], b"hello"),
        other => panic!("expected relayed payload, got {other:?}"),
    }
    assert_silent(&mut b, Duration::from_millis(200)).await;

    let stored = server.wait_for_version("doc1", 1).await;
    assert_eq!(&stored.content[..], b"hello");
}

#[tokio::test]
async fn test_update_then_behind_peer_resyncs() {
    let server = TestServer::start().await;
    let mut a = server.connect("doc1", "A").await;
    let mut b = server.connect("doc1", "B").await;

    send(&mut a, &SyncMessage::sync("doc1", 0, None)).await;
    assert_eq!(recv_reply(&mut a).await.msg_type, MessageType::SyncAck);

    send(&mut a, &SyncMessage::update("doc1", 1, Bytes::from_static(b"X"))).await;
    match next_frame(&mut b).await {
        Some(Message::Binary(payload)) => assert_eq!(&payload[..], b"X"),
        other => panic!("expected relayed payload, got {other:?}"),
    }
    server.wait_for_version("doc1", 1).await;

    send(&mut b, &SyncMessage::sync("doc1", 0, None)).await;
    let reply = recv_reply(&mut b).await;
    assert_eq!(reply.msg_type, MessageType::SyncFull);
    assert_eq!(reply.version, 1);
    assert_eq!(reply.payload.as_deref(), Some(&b"X"[..]));
}

#[tokio::test]
async fn test_late_joiner_receives_full_state() {
    let server = TestServer::start().await;
    server
        .store
        .save(&Document::with_content("doc1", &b"state-v4"[..], 4))
        .await
        .unwrap();

    let mut c = server.connect("doc1", "c").await;
    send(&mut c, &SyncMessage::sync("doc1", 1, None)).await;
    let reply = recv_reply(&mut c).await;

    assert_eq!(reply.msg_type, MessageType::SyncFull);
    assert_eq!(reply.version, 4);
    assert_eq!(reply.payload.as_deref(), Some(&b"state-v4"[..]));
}

#[tokio::test]
async fn test_client_ahead_replaces_stored_state() {
    let server = TestServer::start().await;
    server
        .store
        .save(&Document::with_content("doc1", &b"old"[..], 2))
        .await
        .unwrap();

    let mut a = server.connect("doc1", "a").await;
    send(&mut a, &SyncMessage::sync("doc1", 7, Some(Bytes::from_static(b"offline edits")))).await;
    let reply = recv_reply(&mut a).await;

    assert_eq!(reply.msg_type, MessageType::SyncAck);
    assert_eq!(reply.version, 7);
    let stored = server.store.get("doc1").await.unwrap().unwrap();
    assert_eq!(stored.version, 7);
    assert_eq!(&stored.content[..], b"offline edits");
}

#[tokio::test]
async fn test_sessions_on_other_documents_are_isolated() {
    let server = TestServer::start().await;
    let mut a = server.connect("doc1", "a").await;
    let mut other = server.connect("doc2", "z").await;
    send(&mut a, &SyncMessage::sync("doc1", 0, None)).await;
    recv_reply(&mut a).await;
    send(&mut other, &SyncMessage::sync("doc2", 0, None)).await;
    recv_reply(&mut other).await;

    let mut b = server.connect("doc1", "b").await;
    send(&mut b, &SyncMessage::update("doc1", 1, Bytes::from_static(b"X"))).await;

    assert!(matches!(next_frame(&mut a).await, Some(Message::Binary(_))));
    assert_silent(&mut other, Duration::from_millis(200)).await;
}

#[tokio::test]
async fn test_message_for_other_document_is_ignored() {
    let server = TestServer::start().await;
    let mut a = server.connect("doc1", "a").await;

    send(&mut a, &SyncMessage::update("doc2", 3, Bytes::from_static(b"stray"))).await;
    send(&mut a, &SyncMessage::sync("doc1", 0, None)).await;
    let reply = recv_reply(&mut a).await;

    assert_eq!(reply.msg_type, MessageType::SyncAck);
    assert!(server.store.get("doc2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_only_type_is_ignored() {
    let server = TestServer::start().await;
    let mut a = server.connect("doc1", "a").await;

    send(&mut a, &SyncMessage::sync_ack("doc1", 9, "a")).await;
    send(&mut a, &SyncMessage::sync("doc1", 0, None)).await;

    assert_eq!(recv_reply(&mut a).await.version, 0);
}

#[tokio::test]
async fn test_undecodable_frame_closes_session() {
    let server = TestServer::start().await;
    let mut a = server.connect("doc1", "a").await;

    a.send(Message::Text("{not json".into())).await.unwrap();

    assert!(is_closed(&mut a).await);
}

#[tokio::test]
async fn test_oversized_message_closes_session() {
    let config = ServerConfig::builder().max_message_bytes(1024).build().unwrap();
    let server = TestServer::start_with(config).await;
    let mut a = server.connect("doc1", "a").await;

    send(&mut a, &SyncMessage::update("doc1", 1, vec![b'x'; 4096])).await;

    assert!(is_closed(&mut a).await);
    assert!(server.store.get("doc1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_reconnect_replaces_previous_session() {
    let server = TestServer::start().await;
    let mut first = server.connect("doc1", "a").await;
    send(&mut first, &SyncMessage::sync("doc1", 0, None)).await;
    recv_reply(&mut first).await;

    let mut second = server.connect("doc1", "a").await;
    send(&mut second, &SyncMessage::sync("doc1", 0, None)).await;
    recv_reply(&mut second).await;
    assert!(is_closed(&mut first).await);

    let mut b = server.connect("doc1", "b").await;
    send(&mut b, &SyncMessage::update("doc1", 1, Bytes::from_static(b"after reconnect"))).await;

    match next_frame(&mut second).await {
        Some(Message::Binary(payload)) => assert_eq!(&payload[..], b"after reconnect"),
        other => panic!("expected relayed payload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_client_id_is_generated() {
    let server = TestServer::start().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(server.url("/ws?docId=doc1"))
        .await
        .expect("ws connect");

    send(&mut ws, &SyncMessage::sync("doc1", 0, None)).await;
    let reply = recv_reply(&mut ws).await;

    assert!(!reply.client_id.is_empty());
}

#[tokio::test]
async fn test_missing_doc_id_is_rejected() {
    let server = TestServer::start().await;

    match tokio_tungstenite::connect_async(server.url("/ws?clientId=a")).await {
        Err(tungstenite::Error::Http(response)) => assert_eq!(response.status().as_u16(), 400),
        Err(other) => panic!("expected HTTP rejection, got {other:?}"),
        Ok(_) => panic!("handshake should fail without docId"),
    }
}

#[tokio::test]
async fn test_concurrent_updates_converge_to_highest_version() {
    let server = TestServer::start().await;
    let mut writers = Vec::new();
    for i in 0..4 {
        writers.push(server.connect("doc1", &format!("w{i}")).await);
    }

    for (i, ws) in writers.iter_mut().enumerate() {
        let version = i as i64 + 1;
        send(ws, &SyncMessage::update("doc1", version, format!("v{version}").into_bytes())).await;
    }

    let stored = server.wait_for_version("doc1", 4).await;
    assert_eq!(stored.version, 4);
    assert_eq!(&stored.content[..], b"v4");
}
