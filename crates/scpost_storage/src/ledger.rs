#![forbid(unsafe_code)]

use scpost_kernel_contracts::config::LedgerConfig;
use scpost_kernel_contracts::post::{Post, PostId};
use scpost_kernel_contracts::{ContractViolation, UnixTimeSecs, Validate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("{table} is append-only")]
    AppendOnlyViolation { table: &'static str },
    #[error("{table}: expected id {expected}, got {got}")]
    IdSequenceViolation {
        table: &'static str,
        expected: u64,
        got: u64,
    },
    #[error("{table}: timestamp {got} precedes last committed {last}")]
    TimestampRegression {
        table: &'static str,
        last: u64,
        got: u64,
    },
    #[error(transparent)]
    ContractViolation(#[from] ContractViolation),
}

/// In-process ledger state: the append-only post sequence and the config singleton.
///
/// Every mutation validates first and commits with a single push or replace, so
/// a rejected call leaves no partial state behind.
#[derive(Debug, Clone)]
pub struct PostLedgerStore {
    config: LedgerConfig,
    posts: Vec<Post>,
}

impl PostLedgerStore {
    pub fn new_in_memory(config: LedgerConfig) -> Result<Self, StorageError> {
        config.validate()?;
        Ok(Self {
            config,
            posts: Vec::new(),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn replace_config(&mut self, config: LedgerConfig) -> Result<(), StorageError> {
        config.validate()?;
        if config.ledger_address != self.config.ledger_address {
            return Err(ContractViolation::InvalidValue {
                field: "ledger_config.ledger_address",
                reason: "is fixed at construction",
            }
            .into());
        }
        if config.version != self.config.version {
            return Err(ContractViolation::InvalidValue {
                field: "ledger_config.version",
                reason: "is fixed at construction",
            }
            .into());
        }
        self.config = config;
        Ok(())
    }

    pub fn next_post_id(&self) -> PostId {
        PostId(self.posts.len() as u64)
    }

    pub fn post_count(&self) -> u64 {
        self.posts.len() as u64
    }

    pub fn last_timestamp(&self) -> Option<UnixTimeSecs> {
        self.posts.last().map(|p| p.timestamp)
    }

    pub fn append_post(&mut self, post: Post) -> Result<PostId, StorageError> {
        post.validate()?;
        let expected = self.next_post_id();
        if post.id != expected {
            return Err(StorageError::IdSequenceViolation {
                table: "posts",
                expected: expected.0,
                got: post.id.0,
            });
        }
        if let Some(last) = self.last_timestamp() {
            if post.timestamp < last {
                return Err(StorageError::TimestampRegression {
                    table: "posts",
                    last: last.0,
                    got: post.timestamp.0,
                });
            }
        }
        let id = post.id;
        self.posts.push(post);
        Ok(id)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        usize::try_from(id.0).ok().and_then(|i| self.posts.get(i))
    }

    /// Up to `limit` posts starting at index `skip`, oldest first. Short or empty
    /// when the range runs past the end.
    pub fn posts_page(&self, skip: u64, limit: u64) -> &[Post] {
        let len = self.posts.len();
        let start = usize::try_from(skip).map_or(len, |s| s.min(len));
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(take).min(len);
        &self.posts[start..end]
    }

    pub fn attempt_overwrite_post(&mut self, _id: PostId) -> Result<(), StorageError> {
        Err(StorageError::AppendOnlyViolation { table: "posts" })
    }
}
