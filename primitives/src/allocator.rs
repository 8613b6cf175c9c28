use {
  alloy_primitives::Address,
  serde::{Deserialize, Serialize},
};

/// Grants (`authorized = true`) or revokes the right of `address`
/// to submit allocation decisions against a pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorEntry {
  pub address: Address,
  pub authorized: bool,
}

impl AllocatorEntry {
  pub fn authorize(address: Address) -> Self {
    Self {
      address,
      authorized: true,
    }
  }

  pub fn revoke(address: Address) -> Self {
    Self {
      address,
      authorized: false,
    }
  }
}
