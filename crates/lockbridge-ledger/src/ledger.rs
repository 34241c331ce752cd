//! # The Receipt Ledger
//!
//! [`ReceiptLedger`] owns the append-only receipt sequence and per-owner
//! bookkeeping. It is a single-writer state machine: every mutating
//! operation takes `&mut self` and either applies all of its effects or
//! none of them. Serialization across concurrent callers is the embedding
//! layer's job (see `lockbridge-bridge`).

use std::collections::HashMap;

use lockbridge_core::{AccountId, AssetId};
use thiserror::Error;

use crate::custodian::{AssetCustodian, CustodyError};
use crate::receipt::{Receipt, ReceiptInfo};

/// Errors from ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The custodian rejected the deposit transfer. No ledger state changed.
    #[error("custody transfer failed: {0}")]
    CustodyTransferFailed(#[from] CustodyError),

    /// Query against a receipt id that was never assigned.
    #[error("receipt {id} not found: {receipt_count} receipts exist")]
    ReceiptNotFound {
        /// The id the caller asked for.
        id: u64,
        /// Total receipts created so far.
        receipt_count: u64,
    },
}

/// Append-only store of deposit receipts plus per-owner aggregates.
pub struct ReceiptLedger {
    asset: AssetId,
    vault: AccountId,
    custodian: Box<dyn AssetCustodian>,
    receipts: Vec<Receipt>,
    owner_receipts: HashMap<AccountId, Vec<u64>>,
    owner_locked_total: HashMap<AccountId, u128>,
}

impl std::fmt::Debug for ReceiptLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptLedger")
            .field("asset", &self.asset)
            .field("vault", &self.vault)
            .field("receipt_count", &self.receipts.len())
            .finish()
    }
}

impl ReceiptLedger {
    /// Create a ledger for `asset`, depositing into `vault` via `custodian`.
    pub fn new(asset: AssetId, vault: AccountId, custodian: Box<dyn AssetCustodian>) -> Self {
        Self {
            asset,
            vault,
            custodian,
            receipts: Vec::new(),
            owner_receipts: HashMap::new(),
            owner_locked_total: HashMap::new(),
        }
    }

    /// The asset this ledger locks.
    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    /// The account deposits are transferred into.
    pub fn vault(&self) -> &AccountId {
        &self.vault
    }

    /// Record a deposit of `amount` by `caller`, tagged with `label`.
    ///
    /// Custody moves first: if the custodian rejects the transfer, this
    /// returns [`LedgerError::CustodyTransferFailed`] and no ledger state
    /// changes. On success the receipt id, the append log, the owner's
    /// receipt list, and the owner's locked total all advance atomically.
    pub fn create_receipt(
        &mut self,
        caller: &AccountId,
        amount: u128,
        label: impl Into<String>,
    ) -> Result<u64, LedgerError> {
        self.custodian.transfer(caller, &self.vault, amount)?;

        let id = self.receipts.len() as u64;
        self.receipts.push(Receipt {
            id,
            owner: caller.clone(),
            amount,
            label: label.into(),
        });
        self.owner_receipts
            .entry(caller.clone())
            .or_default()
            .push(id);
        *self.owner_locked_total.entry(caller.clone()).or_insert(0) += amount;
        Ok(id)
    }

    /// Total receipts ever created. Also the next id to assign.
    pub fn receipt_count(&self) -> u64 {
        self.receipts.len() as u64
    }

    /// Creation-ordered receipt ids owned by `owner`; empty if none.
    pub fn my_receipts(&self, owner: &AccountId) -> &[u64] {
        self.owner_receipts
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of amounts locked by `owner`. Never decreases.
    pub fn locked_total(&self, owner: &AccountId) -> u128 {
        self.owner_locked_total.get(owner).copied().unwrap_or(0)
    }

    /// Info view (`H(id)`, label, amount) for receipt `id`.
    pub fn receipt_info(&self, id: u64) -> Result<ReceiptInfo, LedgerError> {
        self.receipt(id).map(ReceiptInfo::for_receipt)
    }

    /// The full receipt record for `id`.
    pub fn receipt(&self, id: u64) -> Result<&Receipt, LedgerError> {
        self.receipts
            .get(id as usize)
            .ok_or(LedgerError::ReceiptNotFound {
                id,
                receipt_count: self.receipt_count(),
            })
    }

    /// All receipts with id >= `start`, in id order.
    ///
    /// The accumulator reads its pending batch through this: ids are dense,
    /// so the tail of the append log is exactly the unbatched range.
    pub fn receipts_from(&self, start: u64) -> &[Receipt] {
        let start = (start as usize).min(self.receipts.len());
        &self.receipts[start..]
    }
}
