//! # Asset Custodian Interface
//!
//! The ledger never holds deposited value; it obtains custody through this
//! interface before recording anything. Production deployments implement
//! [`AssetCustodian`] against whatever actually holds the asset.
//! [`InMemoryCustodian`] is a complete balance-and-allowance implementation
//! for tests and embedded use.

use std::collections::HashMap;

use lockbridge_core::AccountId;
use thiserror::Error;

/// Reasons a custody transfer can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustodyError {
    /// The source account does not hold enough of the asset.
    #[error("insufficient balance for {account}: requested {requested}, available {available}")]
    InsufficientBalance {
        /// The account that was debited.
        account: AccountId,
        /// The amount the transfer asked for.
        requested: u128,
        /// The amount actually available.
        available: u128,
    },

    /// The source account has not approved enough for the recipient to pull.
    #[error("insufficient allowance from {owner} to {spender}: requested {requested}, approved {approved}")]
    InsufficientAllowance {
        /// The account whose funds would move.
        owner: AccountId,
        /// The account pulling the funds.
        spender: AccountId,
        /// The amount the transfer asked for.
        requested: u128,
        /// The amount currently approved.
        approved: u128,
    },
}

/// External component holding and transferring the deposited value.
///
/// `transfer` must be atomic on the custodian's side: either the full
/// amount moves or nothing does.
pub trait AssetCustodian: Send + Sync {
    /// Move `amount` units from `from` into `to`.
    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: u128)
        -> Result<(), CustodyError>;
}

/// A balance-and-allowance custodian held entirely in memory.
///
/// Pull-based: a transfer into `to` consumes allowance that `from`
/// previously granted to `to`. Mirrors the approve/transfer-from flow of
/// the asset contracts the bridge fronts.
#[derive(Debug, Default)]
pub struct InMemoryCustodian {
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<(AccountId, AccountId), u128>,
}

impl InMemoryCustodian {
    /// Create an empty custodian.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air. Test setup helper.
    pub fn mint(&mut self, account: &AccountId, amount: u128) {
        *self.balances.entry(account.clone()).or_insert(0) += amount;
    }

    /// Let `spender` pull up to `amount` from `owner`. Replaces any prior
    /// approval between the pair.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: u128) {
        self.allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    /// Current balance of `account`.
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Remaining approval from `owner` to `spender`.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }
}

impl AssetCustodian for InMemoryCustodian {
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), CustodyError> {
        let approved = self.allowance(from, to);
        if approved < amount {
            return Err(CustodyError::InsufficientAllowance {
                owner: from.clone(),
                spender: to.clone(),
                requested: amount,
                approved,
            });
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(CustodyError::InsufficientBalance {
                account: from.clone(),
                requested: amount,
                available,
            });
        }
        self.allowances
            .insert((from.clone(), to.clone()), approved - amount);
        self.balances.insert(from.clone(), available - amount);
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> (AccountId, AccountId) {
        (AccountId::new("alice"), AccountId::new("vault"))
    }

    #[test]
    fn transfer_requires_allowance() {
        let (alice, vault) = accounts();
        let mut custodian = InMemoryCustodian::new();
        custodian.mint(&alice, 100);

        let err = custodian.transfer(&alice, &vault, 100).unwrap_err();
        assert!(matches!(err, CustodyError::InsufficientAllowance { .. }));
    }

    #[test]
    fn transfer_requires_balance() {
        let (alice, vault) = accounts();
        let mut custodian = InMemoryCustodian::new();
        custodian.approve(&alice, &vault, 100);

        let err = custodian.transfer(&alice, &vault, 100).unwrap_err();
        assert!(matches!(err, CustodyError::InsufficientBalance { .. }));
    }

    #[test]
    fn transfer_moves_funds_and_burns_allowance() {
        let (alice, vault) = accounts();
        let mut custodian = InMemoryCustodian::new();
        custodian.mint(&alice, 100);
        custodian.approve(&alice, &vault, 100);

        custodian.transfer(&alice, &vault, 60).unwrap();
        assert_eq!(custodian.balance_of(&alice), 40);
        assert_eq!(custodian.balance_of(&vault), 60);
        assert_eq!(custodian.allowance(&alice, &vault), 40);
    }

    #[test]
    fn rejected_transfer_changes_nothing() {
        let (alice, vault) = accounts();
        let mut custodian = InMemoryCustodian::new();
        custodian.mint(&alice, 50);
        custodian.approve(&alice, &vault, 100);

        assert!(custodian.transfer(&alice, &vault, 80).is_err());
        assert_eq!(custodian.balance_of(&alice), 50);
        assert_eq!(custodian.balance_of(&vault), 0);
        assert_eq!(custodian.allowance(&alice, &vault), 100);
    }
}
