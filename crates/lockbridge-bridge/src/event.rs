//! # Bridge Notifications
//!
//! Observable notifications for external subscribers, typically a relay
//! process that forwards roots and receipts to the far side of the bridge.
//! Events are delivered in mutation order, after the mutation commits.

use lockbridge_core::{AccountId, AssetId, Digest};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A notification emitted by a committed bridge mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeEvent {
    /// A deposit was recorded.
    NewReceipt {
        /// The new receipt's id.
        receipt_id: u64,
        /// The asset that was locked.
        asset: AssetId,
        /// The locked amount.
        amount: u128,
        /// The depositor.
        owner: AccountId,
    },
    /// A batch of receipts was recorded into a new tree.
    MerkleTreeRecorded {
        /// The new tree's index.
        tree_index: u64,
        /// The new tree's root digest.
        root: Digest,
    },
}

/// A subscriber to bridge notifications.
///
/// Sinks are invoked while the bridge's state lock is held, so delivery
/// order matches mutation order exactly. A sink must not call back into
/// the bridge and should return quickly.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn publish(&self, event: &BridgeEvent);
}

/// An [`EventSink`] that records every event it sees. Test instrumentation.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BridgeEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in delivery order.
    pub fn events(&self) -> Vec<BridgeEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: &BridgeEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_preserves_order() {
        let sink = RecordingSink::new();
        for i in 0..3 {
            sink.publish(&BridgeEvent::MerkleTreeRecorded {
                tree_index: i,
                root: Digest([i as u8; 32]),
            });
        }
        let events = sink.events();
        assert_eq!(events.len(), 3);
        for (i, event) in events.iter().enumerate() {
            assert!(
                matches!(event, BridgeEvent::MerkleTreeRecorded { tree_index, .. } if *tree_index == i as u64)
            );
        }
    }

    #[test]
    fn event_serde_round_trip() {
        let event = BridgeEvent::NewReceipt {
            receipt_id: 4,
            asset: AssetId::new("TOKEN"),
            amount: 77,
            owner: AccountId::new("alice"),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: BridgeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
