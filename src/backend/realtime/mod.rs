//! Real-time Relay Module
//!
//! Tracks which sessions are watching which document and fans updates out
//! between them.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs     - Module exports and documentation
//! ├── hub.rs     - Connection registry and fan-out broadcast
//! └── session.rs - Session identity, handle and outbound frames
//! ```
//!
//! # Delivery Semantics
//!
//! Broadcast is best-effort and at-most-once: a frame is offered once to each
//! session's bounded queue, and a session that cannot take it is disconnected
//! rather than allowed to stall the room. The sender of an update never
//! receives its own broadcast.

/// Connection registry
pub mod hub;

/// Session handles and outbound frames
pub mod session;

// Re-export commonly used types
pub use hub::{Hub, Registration};
pub use session::{OutboundFrame, SessionHandle, SessionKey};
