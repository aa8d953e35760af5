#![forbid(unsafe_code)]

use scpost_kernel_contracts::config::LedgerConfig;
use scpost_kernel_contracts::post::{Post, PostId};

use crate::ledger::{PostLedgerStore, StorageError};

/// Typed repository interface for post ledger persistence wiring.
pub trait PostLedgerRepo {
    fn ledger_config_row(&self) -> &LedgerConfig;
    fn replace_ledger_config_row(&mut self, config: LedgerConfig) -> Result<(), StorageError>;
    fn next_post_id(&self) -> PostId;
    fn append_post_row(&mut self, post: Post) -> Result<PostId, StorageError>;
    fn post_row(&self, id: PostId) -> Option<&Post>;
    fn post_rows(&self) -> &[Post];
    fn post_rows_page(&self, skip: u64, limit: u64) -> &[Post];
}

impl PostLedgerRepo for PostLedgerStore {
    fn ledger_config_row(&self) -> &LedgerConfig {
        self.config()
    }

    fn replace_ledger_config_row(&mut self, config: LedgerConfig) -> Result<(), StorageError> {
        self.replace_config(config)
    }

    fn next_post_id(&self) -> PostId {
        PostLedgerStore::next_post_id(self)
    }

    fn append_post_row(&mut self, post: Post) -> Result<PostId, StorageError> {
        self.append_post(post)
    }

    fn post_row(&self, id: PostId) -> Option<&Post> {
        self.post(id)
    }

    fn post_rows(&self) -> &[Post] {
        self.posts()
    }

    fn post_rows_page(&self, skip: u64, limit: u64) -> &[Post] {
        self.posts_page(skip, limit)
    }
}
