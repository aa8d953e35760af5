#![forbid(unsafe_code)]

use scpost_kernel_contracts::Address;

/// Transport-level view of a call: who submitted it, and for whom a relay claims
/// to be submitting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub sender: Address,
    pub relayed_for: Option<Address>,
}

impl CallContext {
    pub fn direct(sender: Address) -> Self {
        Self {
            sender,
            relayed_for: None,
        }
    }

    pub fn relayed(relay: Address, on_behalf_of: Address) -> Self {
        Self {
            sender: relay,
            relayed_for: Some(on_behalf_of),
        }
    }
}

/// Resolves the effective caller of a request.
pub trait CallerResolver: Send + Sync {
    fn resolve(&self, call: &CallContext, trusted_relay: Address) -> Address;
}

/// Every caller is the transport sender; relay claims are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectCallerResolver;

impl CallerResolver for DirectCallerResolver {
    fn resolve(&self, call: &CallContext, _trusted_relay: Address) -> Address {
        call.sender
    }
}

/// Honors `relayed_for` only when the call arrives through the trusted relay.
/// A zero trusted relay disables relaying entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrustedRelayResolver;

impl CallerResolver for TrustedRelayResolver {
    fn resolve(&self, call: &CallContext, trusted_relay: Address) -> Address {
        match call.relayed_for {
            Some(on_behalf_of) if !trusted_relay.is_zero() && call.sender == trusted_relay => {
                on_behalf_of
            }
            Some(_) => {
                tracing::debug!(
                    sender = %call.sender,
                    "relay claim from untrusted sender ignored"
                );
                call.sender
            }
            None => call.sender,
        }
    }
}
