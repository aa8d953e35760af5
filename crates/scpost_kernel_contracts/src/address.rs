#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ContractViolation;

pub const ADDRESS_LEN: usize = 20;

/// 20-byte account / collection identity. The all-zero value is the null address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn repeat_byte(b: u8) -> Self {
        Self([b; ADDRESS_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    pub fn parse(s: &str) -> Result<Self, ContractViolation> {
        parse_prefixed_hex::<ADDRESS_LEN>(s, "address").map(Self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Decodes a `0x`-prefixed hex string of exactly `N` bytes.
pub(crate) fn parse_prefixed_hex<const N: usize>(
    s: &str,
    field: &'static str,
) -> Result<[u8; N], ContractViolation> {
    let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) else {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must be 0x-prefixed hex",
        });
    };
    if digits.len() != N * 2 {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "has wrong hex length",
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).map_err(|_| ContractViolation::InvalidValue {
        field,
        reason: "contains non-hex characters",
    })?;
    Ok(out)
}
