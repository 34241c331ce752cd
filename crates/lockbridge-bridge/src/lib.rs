#![deny(missing_docs)]

//! # lockbridge-bridge — The Bridge Service Layer
//!
//! Composes the receipt ledger and merkle accumulator behind one exclusive
//! lock, the single serialization point both components assume. Every
//! mutating operation takes effect atomically in a strict total order;
//! reads observe consistent snapshots; registered [`EventSink`]s see
//! notifications in exactly the mutation order.
//!
//! Embedders that need no concurrent callers can use the component crates
//! directly; this layer exists for deployments that share one bridge
//! instance across threads (e.g. a relay process observing events).

pub mod event;
pub mod service;

// Re-export primary types.
pub use event::{BridgeEvent, EventSink, RecordingSink};
pub use service::{Bridge, BridgeError};
