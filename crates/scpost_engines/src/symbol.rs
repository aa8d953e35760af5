#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use scpost_kernel_contracts::Address;

/// Short display symbol of a derivative collection. Used only for length accounting.
pub trait SymbolProvider: Send + Sync {
    fn symbol_of(&self, collection: Address) -> String;
}

/// Unknown collections report an empty symbol.
#[derive(Debug, Default)]
pub struct InMemorySymbolProvider {
    symbols: RwLock<BTreeMap<Address, String>>,
}

impl InMemorySymbolProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_symbol(&self, collection: Address, symbol: impl Into<String>) {
        self.symbols
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(collection, symbol.into());
    }
}

impl SymbolProvider for InMemorySymbolProvider {
    fn symbol_of(&self, collection: Address) -> String {
        self.symbols
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }
}
