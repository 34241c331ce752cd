//! # The Bridge Service
//!
//! [`Bridge`] owns the ledger and accumulator behind one `RwLock`. Writers
//! serialize; readers see consistent snapshots. Events publish under the
//! write lock, after the mutation has fully committed, so subscribers
//! observe the same total order the state machine executed.

use std::sync::Arc;

use lockbridge_core::{AccountId, AssetId};
use lockbridge_ledger::{LedgerError, ReceiptInfo, ReceiptLedger};
use lockbridge_merkle::{AccumulatorError, MerkleAccumulator, MerklePath, MerkleTree};
use parking_lot::RwLock;
use thiserror::Error;

use crate::event::{BridgeEvent, EventSink};

/// Errors surfaced by bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// An accumulator operation failed.
    #[error(transparent)]
    Accumulator(#[from] AccumulatorError),
}

struct BridgeInner {
    ledger: ReceiptLedger,
    accumulator: MerkleAccumulator,
}

/// The single serialization point over both bridge components.
pub struct Bridge {
    inner: RwLock<BridgeInner>,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl Bridge {
    /// Compose a bridge from its two components.
    pub fn new(ledger: ReceiptLedger, accumulator: MerkleAccumulator) -> Self {
        Self {
            inner: RwLock::new(BridgeInner {
                ledger,
                accumulator,
            }),
            sinks: Vec::new(),
        }
    }

    /// Register a notification subscriber.
    ///
    /// Registration happens before the bridge is shared; events flow to
    /// every registered sink in mutation order.
    pub fn register_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    fn publish(&self, event: BridgeEvent) {
        for sink in &self.sinks {
            sink.publish(&event);
        }
    }

    /// Record a deposit. See [`ReceiptLedger::create_receipt`].
    pub fn create_receipt(
        &self,
        caller: &AccountId,
        amount: u128,
        label: impl Into<String>,
    ) -> Result<u64, BridgeError> {
        let mut inner = self.inner.write();
        let receipt_id = inner.ledger.create_receipt(caller, amount, label)?;
        let asset = inner.ledger.asset().clone();

        tracing::info!(receipt_id, owner = %caller, amount, "receipt created");
        self.publish(BridgeEvent::NewReceipt {
            receipt_id,
            asset,
            amount,
            owner: caller.clone(),
        });
        Ok(receipt_id)
    }

    /// Batch all pending receipts into a new tree. See
    /// [`MerkleAccumulator::record_receipts`].
    pub fn record_receipts(&self, caller: &AccountId) -> Result<u64, BridgeError> {
        let mut inner = self.inner.write();
        let BridgeInner {
            ledger,
            accumulator,
        } = &mut *inner;
        let tree_index = accumulator.record_receipts(ledger, caller)?;
        let root = accumulator.merkle_tree(tree_index)?.root();

        tracing::info!(tree_index, root = %root, "merkle tree recorded");
        self.publish(BridgeEvent::MerkleTreeRecorded { tree_index, root });
        Ok(tree_index)
    }

    /// The asset this bridge locks.
    pub fn asset(&self) -> AssetId {
        self.inner.read().ledger.asset().clone()
    }

    /// Total receipts ever created.
    pub fn receipt_count(&self) -> u64 {
        self.inner.read().ledger.receipt_count()
    }

    /// Creation-ordered receipt ids owned by `owner`.
    pub fn my_receipts(&self, owner: &AccountId) -> Vec<u64> {
        self.inner.read().ledger.my_receipts(owner).to_vec()
    }

    /// Sum of amounts locked by `owner`.
    pub fn locked_total(&self, owner: &AccountId) -> u128 {
        self.inner.read().ledger.locked_total(owner)
    }

    /// Info view for receipt `id`.
    pub fn receipt_info(&self, id: u64) -> Result<ReceiptInfo, BridgeError> {
        Ok(self.inner.read().ledger.receipt_info(id)?)
    }

    /// Number of trees recorded so far.
    pub fn merkle_tree_count(&self) -> u64 {
        self.inner.read().accumulator.merkle_tree_count()
    }

    /// Owned snapshot of the tree at `index`.
    pub fn merkle_tree(&self, index: u64) -> Result<MerkleTree, BridgeError> {
        Ok(self.inner.read().accumulator.merkle_tree(index)?.clone())
    }

    /// Inclusion path for `receipt_id`.
    pub fn generate_merkle_path(&self, receipt_id: u64) -> Result<MerklePath, BridgeError> {
        Ok(self
            .inner
            .read()
            .accumulator
            .generate_merkle_path(receipt_id)?)
    }
}
