#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use scpost_kernel_contracts::Address;

/// Resolves an original identifier (e.g. an email) to its derivative collection.
pub trait DerivativeRegistry: Send + Sync {
    fn resolve(&self, original: &str) -> Option<Address>;
}

#[derive(Debug, Default)]
pub struct InMemoryDerivativeRegistry {
    entries: RwLock<BTreeMap<String, Address>>,
}

impl InMemoryDerivativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, original: impl Into<String>, derivative: Address) {
        let original = original.into();
        tracing::debug!(%original, %derivative, "derivative registered");
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(original, derivative);
    }

    pub fn unregister(&self, original: &str) -> Option<Address> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(original)
    }
}

impl DerivativeRegistry for InMemoryDerivativeRegistry {
    fn resolve(&self, original: &str) -> Option<Address> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(original)
            .copied()
    }
}
