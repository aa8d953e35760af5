#![forbid(unsafe_code)]

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use scpost_engines::admission::{LengthVerdict, PostLengthPolicy};
use scpost_engines::caller::{CallContext, CallerResolver};
use scpost_engines::clock::Clock;
use scpost_engines::ownership::OwnershipOracle;
use scpost_engines::registry::DerivativeRegistry;
use scpost_engines::symbol::SymbolProvider;
use scpost_kernel_contracts::config::LedgerConfig;
use scpost_kernel_contracts::post::{Post, PostId, PostSavedEvent, ReplyToId, ThreadRootId};
use scpost_kernel_contracts::text::MalformedText;
use scpost_kernel_contracts::Address;
use scpost_storage::ledger::PostLedgerStore;
use scpost_storage::repo::PostLedgerRepo;

use crate::admin::AdminGate;
use crate::notify::PostSavedSink;
use crate::PostLedgerError;

/// External lookups consulted on the write path.
#[derive(Clone)]
pub struct PostLedgerCollaborators {
    pub registry: Arc<dyn DerivativeRegistry>,
    pub oracle: Arc<dyn OwnershipOracle>,
    pub symbols: Arc<dyn SymbolProvider>,
    pub caller_resolver: Arc<dyn CallerResolver>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePostRequest {
    /// Raw content as received from the transport; must be well-formed UTF-8.
    pub content: Vec<u8>,
    /// Original identifier (e.g. an email) naming the derivative that gates the write.
    pub original: String,
    pub reply_to_id: ReplyToId,
    pub thread_root_id: ThreadRootId,
}

impl SavePostRequest {
    pub fn v1(
        content: impl Into<Vec<u8>>,
        original: impl Into<String>,
        reply_to_id: ReplyToId,
        thread_root_id: ThreadRootId,
    ) -> Self {
        Self {
            content: content.into(),
            original: original.into(),
            reply_to_id,
            thread_root_id,
        }
    }
}

/// Ownership-gated, append-only post ledger.
///
/// Writes (posts and configuration changes) run one at a time under the write
/// lock, including their collaborator lookups, so each is all-or-nothing. Reads
/// share the lock and only ever observe committed state.
///
/// Sinks run after the write lock is released, so they may read the ledger.
/// They must not save posts from inside `post_saved`.
pub struct PostLedger<R: PostLedgerRepo = PostLedgerStore> {
    store: RwLock<R>,
    collaborators: PostLedgerCollaborators,
    sinks: Vec<Arc<dyn PostSavedSink>>,
    // Handed over from the write lock so events leave in id order.
    notify_order: Mutex<()>,
}

impl PostLedger<PostLedgerStore> {
    pub fn new_in_memory(
        config: LedgerConfig,
        collaborators: PostLedgerCollaborators,
    ) -> Result<Self, PostLedgerError> {
        let store = PostLedgerStore::new_in_memory(config)?;
        Ok(Self::with_repo(store, collaborators))
    }
}

impl<R: PostLedgerRepo> PostLedger<R> {
    pub fn with_repo(repo: R, collaborators: PostLedgerCollaborators) -> Self {
        Self {
            store: RwLock::new(repo),
            collaborators,
            sinks: Vec::new(),
            notify_order: Mutex::new(()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn PostSavedSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn save_post(
        &self,
        call: &CallContext,
        request: SavePostRequest,
    ) -> Result<Post, PostLedgerError> {
        let mut store = self.write_store();
        let admitted = self.admit(&mut store, call, request);
        let _in_order = admitted.is_ok().then(|| self.lock_notify_order());
        drop(store);
        match admitted {
            Ok(post) => {
                tracing::info!(
                    post_id = post.id.0,
                    author = %post.author,
                    derivative = %post.derivative_address,
                    reply_to_id = post.reply_to_id.0,
                    "post saved"
                );
                let event = PostSavedEvent::from(&post);
                for sink in &self.sinks {
                    sink.post_saved(&event);
                }
                Ok(post)
            }
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    sender = %call.sender,
                    error = %e,
                    "post rejected"
                );
                Err(e)
            }
        }
    }

    fn admit(
        &self,
        store: &mut R,
        call: &CallContext,
        request: SavePostRequest,
    ) -> Result<Post, PostLedgerError> {
        let (policy, trusted_relay) = {
            let config = store.ledger_config_row();
            (PostLengthPolicy::from_config(config), config.trusted_relay)
        };

        let derivative = self
            .collaborators
            .registry
            .resolve(&request.original)
            .filter(|a| !a.is_zero())
            .ok_or_else(|| PostLedgerError::DerivativeNotFound {
                original: request.original.clone(),
            })?;

        let caller = self
            .collaborators
            .caller_resolver
            .resolve(call, trusted_relay);

        if self.collaborators.oracle.balance_of(derivative, caller) == 0 {
            return Err(PostLedgerError::NotAnOwner { derivative, caller });
        }

        let symbol = self.collaborators.symbols.symbol_of(derivative);
        if let LengthVerdict::TooLong { length, budget } =
            policy.check(&request.content, &symbol)?
        {
            return Err(PostLedgerError::PostTooLong { length, budget });
        }

        let content = String::from_utf8(request.content).map_err(|e| MalformedText {
            offset: e.utf8_error().valid_up_to(),
            reason: "invalid utf-8",
        })?;

        let now = self.collaborators.clock.now();
        let timestamp = match store.post_rows().last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };

        let post = Post::v1(
            store.next_post_id(),
            content,
            derivative,
            caller,
            timestamp,
            request.reply_to_id,
            request.thread_root_id,
        )?;
        store.append_post_row(post.clone())?;
        Ok(post)
    }

    /// Up to `limit` posts starting at `skip`, oldest first.
    pub fn get_posts(&self, skip: u64, limit: u64) -> Vec<Post> {
        let store = self.read_store();
        let page = store.post_rows_page(skip, limit).to_vec();
        tracing::debug!(skip, limit, returned = page.len(), "posts page served");
        page
    }

    pub fn post(&self, id: PostId) -> Option<Post> {
        self.read_store().post_row(id).cloned()
    }

    pub fn post_count(&self) -> u64 {
        self.read_store().next_post_id().0
    }

    pub fn config(&self) -> LedgerConfig {
        self.read_store().ledger_config_row().clone()
    }

    pub fn ledger_address(&self) -> Address {
        self.read_store().ledger_config_row().ledger_address
    }

    pub fn max_post_length(&self) -> u32 {
        self.read_store().ledger_config_row().max_post_length
    }

    pub fn infix_length(&self) -> u32 {
        self.read_store().ledger_config_row().infix_length
    }

    pub fn trusted_relay(&self) -> Address {
        self.read_store().ledger_config_row().trusted_relay
    }

    pub fn version(&self) -> String {
        self.read_store().ledger_config_row().version.clone()
    }

    pub fn reply_all_address(&self) -> Address {
        self.read_store().ledger_config_row().reply_all_address
    }

    pub fn owner(&self) -> Address {
        self.read_store().ledger_config_row().owner
    }

    pub fn derivative_symbol_suffix(&self) -> String {
        self.read_store()
            .ledger_config_row()
            .derivative_symbol_suffix
            .clone()
    }

    pub fn set_max_post_length(&self, call: &CallContext, value: u32) -> Result<(), PostLedgerError> {
        self.update_config(call, "max_post_length", |c| c.max_post_length = value)
    }

    pub fn set_infix_length(&self, call: &CallContext, value: u32) -> Result<(), PostLedgerError> {
        self.update_config(call, "infix_length", |c| c.infix_length = value)
    }

    pub fn set_reply_all_address(
        &self,
        call: &CallContext,
        address: Address,
    ) -> Result<(), PostLedgerError> {
        self.update_config(call, "reply_all_address", |c| c.reply_all_address = address)
    }

    pub fn set_trusted_relay(
        &self,
        call: &CallContext,
        address: Address,
    ) -> Result<(), PostLedgerError> {
        self.update_config(call, "trusted_relay", |c| c.trusted_relay = address)
    }

    pub fn set_derivative_symbol_suffix(
        &self,
        call: &CallContext,
        suffix: impl Into<String>,
    ) -> Result<(), PostLedgerError> {
        let suffix = suffix.into();
        self.update_config(call, "derivative_symbol_suffix", |c| {
            c.derivative_symbol_suffix = suffix
        })
    }

    /// Hands the owner role to `new_owner`, which must not be the zero address.
    pub fn transfer_ownership(
        &self,
        call: &CallContext,
        new_owner: Address,
    ) -> Result<(), PostLedgerError> {
        self.update_config(call, "owner", |c| c.owner = new_owner)
    }

    fn update_config(
        &self,
        call: &CallContext,
        field: &'static str,
        mutate: impl FnOnce(&mut LedgerConfig),
    ) -> Result<(), PostLedgerError> {
        let mut store = self.write_store();
        let current = store.ledger_config_row();
        let caller = self
            .collaborators
            .caller_resolver
            .resolve(call, current.trusted_relay);
        if let Err(e) = AdminGate::ensure_owner(current, caller) {
            tracing::warn!(field, caller = %caller, "config update refused");
            return Err(e);
        }
        let mut next = current.clone();
        mutate(&mut next);
        if let Err(e) = store.replace_ledger_config_row(next) {
            tracing::warn!(field, caller = %caller, error = %e, "config update rejected");
            return Err(e.into());
        }
        tracing::info!(field, caller = %caller, "ledger config updated");
        Ok(())
    }

    // Every write commits with one append or replace, so state behind a
    // poisoned lock is still consistent.
    fn read_store(&self) -> RwLockReadGuard<'_, R> {
        self.store.read().unwrap_or_else(|poisoned| {
            tracing::warn!("post ledger lock poisoned; recovering");
            self.store.clear_poison();
            poisoned.into_inner()
        })
    }

    fn lock_notify_order(&self) -> MutexGuard<'_, ()> {
        self.notify_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, R> {
        self.store.write().unwrap_or_else(|poisoned| {
            tracing::warn!("post ledger lock poisoned; recovering");
            self.store.clear_poison();
            poisoned.into_inner()
        })
    }
}
