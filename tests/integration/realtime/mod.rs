//! End-to-end WebSocket sync tests

pub mod sync_test;
