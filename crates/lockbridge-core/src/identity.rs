//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the two identities the bridge core cares
//! about: the account that deposits ([`AccountId`]) and the asset being
//! locked ([`AssetId`]). Each is a distinct type. You cannot pass an
//! `AssetId` where an `AccountId` is expected.
//!
//! Both are opaque strings to the core: account addressing and asset
//! registry semantics belong to the external Asset Custodian.

use serde::{Deserialize, Serialize};

/// The identity of a depositor or other caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The identity of the asset a ledger locks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    /// Create an asset identifier from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_display_and_access() {
        let id = AccountId::new("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{id}"), "alice");
    }

    #[test]
    fn asset_id_equality() {
        assert_eq!(AssetId::new("TOKEN"), AssetId::from("TOKEN"));
        assert_ne!(AssetId::new("TOKEN"), AssetId::new("OTHER"));
    }

    #[test]
    fn serde_round_trip() {
        let id = AccountId::new("depositor-7");
        let json = serde_json::to_string(&id).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
