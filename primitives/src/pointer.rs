use {
  crate::Error,
  cid::Cid,
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
};

/// Content address of a JSON document pinned to IPFS.
///
/// The pointer is kept in the exact textual form returned by the pinning
/// service (CIDv0 `Qm...` or CIDv1), because that string is what gets
/// written on chain and what the indexer matches against. Parsing only
/// checks that the text is a well-formed CID.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MetadataPointer(String);

/// Metadata protocol id understood by Allo for IPFS pointers.
pub const IPFS_PROTOCOL: u64 = 1;

impl MetadataPointer {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn cid(&self) -> Cid {
    Cid::try_from(self.0.as_str()).expect("validated on construction")
  }
}

impl FromStr for MetadataPointer {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    Cid::try_from(trimmed)
      .map(|_| Self(trimmed.to_owned()))
      .map_err(|e| Error::InvalidPointer(s.to_owned(), e))
  }
}

impl TryFrom<String> for MetadataPointer {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<MetadataPointer> for String {
  fn from(pointer: MetadataPointer) -> Self {
    pointer.0
  }
}

impl Display for MetadataPointer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Debug for MetadataPointer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "ipfs({})", self.0)
  }
}
