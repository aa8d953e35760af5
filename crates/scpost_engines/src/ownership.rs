#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use scpost_kernel_contracts::Address;

/// Token balance a holder carries in a derivative collection.
pub trait OwnershipOracle: Send + Sync {
    fn balance_of(&self, collection: Address, holder: Address) -> u128;
}

#[derive(Debug, Default)]
pub struct InMemoryOwnershipOracle {
    balances: RwLock<BTreeMap<(Address, Address), u128>>,
}

impl InMemoryOwnershipOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, collection: Address, holder: Address, balance: u128) {
        let mut balances = self
            .balances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if balance == 0 {
            balances.remove(&(collection, holder));
        } else {
            balances.insert((collection, holder), balance);
        }
    }

    pub fn mint(&self, collection: Address, holder: Address) {
        let mut balances = self
            .balances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = balances.entry((collection, holder)).or_insert(0);
        *entry = entry.saturating_add(1);
    }
}

impl OwnershipOracle for InMemoryOwnershipOracle {
    fn balance_of(&self, collection: Address, holder: Address) -> u128 {
        self.balances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(collection, holder))
            .copied()
            .unwrap_or(0)
    }
}
