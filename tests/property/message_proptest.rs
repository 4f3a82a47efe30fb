//! Property-based tests for SyncMessage
//!
//! Uses proptest to generate random inputs and verify properties

use bytes::Bytes;
use docsync::shared::{MessageType, SyncMessage};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_payload_survives_wire_encoding(
        doc_id in "[a-z0-9-]{1,16}",
        version in 0i64..1_000_000,
        payload in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let msg = SyncMessage::update(doc_id.clone(), version, payload.clone());
        let decoded = SyncMessage::decode(msg.encode().unwrap().as_bytes()).unwrap();

        prop_assert_eq!(decoded.payload_or_empty(), Bytes::from(payload));
        prop_assert_eq!(decoded.msg_type, MessageType::Update);
        prop_assert_eq!(&decoded.doc_id, &doc_id);
        prop_assert_eq!(decoded.version, version);
    }

    #[test]
    fn test_decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        let _ = SyncMessage::decode(&data);
    }

    #[test]
    fn test_only_sync_and_update_are_client_requests(version in any::<i64>()) {
        prop_assert!(SyncMessage::sync("d", version, None).msg_type.is_client_request());
        prop_assert!(SyncMessage::update("d", version, Vec::<u8>::new()).msg_type.is_client_request());
        prop_assert!(!SyncMessage::sync_ack("d", version, "c").msg_type.is_client_request());
        prop_assert!(!SyncMessage::sync_full("d", version, Bytes::new(), "c").msg_type.is_client_request());
    }
}
