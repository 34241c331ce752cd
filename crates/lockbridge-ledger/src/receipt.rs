//! # Deposit Receipts
//!
//! A [`Receipt`] is the immutable record of one deposit. The `label` is an
//! opaque destination tag (typically the beneficiary address on the far
//! side of the bridge) and is never interpreted here.

use lockbridge_core::{AccountId, Digest};
use lockbridge_crypto::receipt_id_digest;
use serde::{Deserialize, Serialize};

/// An immutable record of one deposit.
///
/// `id` is the 0-based creation sequence number, assigned once and never
/// reused. Receipts are append-only: no mutation or deletion after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// 0-based creation sequence number.
    pub id: u64,
    /// Identity of the depositor.
    pub owner: AccountId,
    /// Quantity of the asset locked by this deposit.
    pub amount: u128,
    /// Opaque destination tag. Not interpreted by the core.
    pub label: String,
}

/// The public view of a receipt returned by info queries.
///
/// Carries `H(id)` rather than the bare id: the digest is one of the three
/// leaf-hash inputs, so callers assembling or checking proofs get the exact
/// bytes the Merkle layer used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptInfo {
    /// SHA-256 of the receipt id's 32-byte big-endian word encoding.
    pub id_digest: Digest,
    /// The receipt's destination tag.
    pub label: String,
    /// The locked amount.
    pub amount: u128,
}

impl ReceiptInfo {
    /// Build the info view for a receipt.
    pub fn for_receipt(receipt: &Receipt) -> Self {
        Self {
            id_digest: receipt_id_digest(receipt.id),
            label: receipt.label.clone(),
            amount: receipt.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_carries_id_digest() {
        let receipt = Receipt {
            id: 0,
            owner: AccountId::new("alice"),
            amount: 100,
            label: "CREATE".into(),
        };
        let info = ReceiptInfo::for_receipt(&receipt);
        assert_eq!(info.id_digest, receipt_id_digest(0));
        assert_eq!(info.label, "CREATE");
        assert_eq!(info.amount, 100);
    }

    #[test]
    fn receipt_serde_round_trip() {
        let receipt = Receipt {
            id: 3,
            owner: AccountId::new("bob"),
            amount: 42,
            label: "tag".into(),
        };
        let json = serde_json::to_string(&receipt).unwrap();
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, receipt);
    }
}
