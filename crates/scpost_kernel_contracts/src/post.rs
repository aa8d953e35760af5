#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::address::parse_prefixed_hex;
use crate::{Address, ContractViolation, UnixTimeSecs, Validate};

pub const THREAD_ROOT_ID_LEN: usize = 32;

/// Position of a post in the ledger. The first admitted post is `PostId(0)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id of the post being replied to. `0` doubles as the "top-level" sentinel, so
/// post 0 itself cannot be addressed as a reply target.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReplyToId(pub u64);

impl ReplyToId {
    pub const TOP_LEVEL: ReplyToId = ReplyToId(0);

    pub fn is_top_level(&self) -> bool {
        self.0 == 0
    }
}

/// Caller-supplied 32-byte thread correlation token. Never interpreted by the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadRootId([u8; THREAD_ROOT_ID_LEN]);

impl ThreadRootId {
    pub const fn from_bytes(bytes: [u8; THREAD_ROOT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; THREAD_ROOT_ID_LEN] {
        &self.0
    }

    pub fn parse(s: &str) -> Result<Self, ContractViolation> {
        parse_prefixed_hex::<THREAD_ROOT_ID_LEN>(s, "thread_root_id").map(Self)
    }
}

impl fmt::Display for ThreadRootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for ThreadRootId {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ThreadRootId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ThreadRootId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// An admitted post. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    /// Snapshot of the registry resolution at admission time.
    pub derivative_address: Address,
    pub author: Address,
    pub timestamp: UnixTimeSecs,
    pub reply_to_id: ReplyToId,
    pub thread_root_id: ThreadRootId,
}

impl Post {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        id: PostId,
        content: String,
        derivative_address: Address,
        author: Address,
        timestamp: UnixTimeSecs,
        reply_to_id: ReplyToId,
        thread_root_id: ThreadRootId,
    ) -> Result<Self, ContractViolation> {
        let p = Self {
            id,
            content,
            derivative_address,
            author,
            timestamp,
            reply_to_id,
            thread_root_id,
        };
        p.validate()?;
        Ok(p)
    }
}

impl Validate for Post {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.derivative_address.is_zero() {
            return Err(ContractViolation::InvalidValue {
                field: "post.derivative_address",
                reason: "must not be the zero address",
            });
        }
        Ok(())
    }
}

/// Notification published for every admitted post. Field set and order are
/// part of the observer contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSavedEvent {
    pub id: PostId,
    pub content: String,
    pub derivative_address: Address,
    pub author: Address,
    pub timestamp: UnixTimeSecs,
    pub reply_to_id: ReplyToId,
    pub thread_root_id: ThreadRootId,
}

impl From<&Post> for PostSavedEvent {
    fn from(p: &Post) -> Self {
        Self {
            id: p.id,
            content: p.content.clone(),
            derivative_address: p.derivative_address,
            author: p.author,
            timestamp: p.timestamp,
            reply_to_id: p.reply_to_id,
            thread_root_id: p.thread_root_id,
        }
    }
}
