use {
  crate::{to_lower_hex, Error},
  alloy_primitives::{Address, B256},
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
};

/// EIP-155 network identifier.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
  /// Arbitrum Sepolia, the only network the application flow runs on.
  pub const ARBITRUM_SEPOLIA: ChainId = ChainId(421614);
}

impl Display for ChainId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Debug for ChainId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "chain({})", self.0)
  }
}

impl FromStr for ChainId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(s.parse()?))
  }
}

/// Network scoped pool identifier assigned by the Allo contract.
#[derive(
  Copy,
  Clone,
  Default,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct PoolId(pub u64);

impl Display for PoolId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Debug for PoolId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "pool({})", self.0)
  }
}

impl FromStr for PoolId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(s.parse()?))
  }
}

/// Identifier of a profile in the Allo registry.
///
/// Profile ids are keccak hashes, always rendered as `0x` followed by
/// 64 hex characters.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProfileId(pub B256);

impl ProfileId {
  /// True when `value` has the exact shape of a profile id hash,
  /// that is `^0x[0-9a-fA-F]{64}$`.
  pub fn is_hash(value: &str) -> bool {
    match value.strip_prefix("0x") {
      Some(digits) => {
        digits.len() == 64 && digits.chars().all(|c| c.is_ascii_hexdigit())
      }
      None => false,
    }
  }
}

impl Display for ProfileId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", to_lower_hex(self.0))
  }
}

impl Debug for ProfileId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "profile({})", to_lower_hex(self.0))
  }
}

impl FromStr for ProfileId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if !Self::is_hash(s) {
      return Err(Error::InvalidProfileId(s.to_owned()));
    }
    B256::from_str(s)
      .map(Self)
      .map_err(|_| Error::InvalidProfileId(s.to_owned()))
  }
}

/// Recipient identifier as emitted by the strategy in its registration
/// events. It is never generated locally.
#[derive(
  Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecipientId(pub Address);

impl Display for RecipientId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", to_lower_hex(self.0))
  }
}

impl Debug for RecipientId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "recipient({})", to_lower_hex(self.0))
  }
}

impl From<Address> for RecipientId {
  fn from(address: Address) -> Self {
    Self(address)
  }
}

impl FromStr for RecipientId {
  type Err = alloy_primitives::hex::FromHexError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(Address::from_str(s)?))
  }
}
