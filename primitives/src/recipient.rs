use {
  crate::{Error, MetadataPointer, PoolId, RecipientId},
  alloy_primitives::{Address, U256},
  serde::{Deserialize, Serialize},
  std::str::FromStr,
};

/// Recipient status as tracked by the strategy contract.
///
/// Discriminants match the `uint8` values of the on-chain enum.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
  None = 0,
  Pending = 1,
  Accepted = 2,
  Rejected = 3,
  Appealed = 4,
  InReview = 5,
  Canceled = 6,
}

impl From<Status> for u8 {
  fn from(status: Status) -> Self {
    status as u8
  }
}

impl TryFrom<u8> for Status {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Status::None,
      1 => Status::Pending,
      2 => Status::Accepted,
      3 => Status::Rejected,
      4 => Status::Appealed,
      5 => Status::InReview,
      6 => Status::Canceled,
      other => return Err(Error::InvalidStatus(other)),
    })
  }
}

/// An allocator's verdict on a recipient.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
  Approve,
  Reject,
}

impl From<Decision> for Status {
  fn from(decision: Decision) -> Self {
    match decision {
      Decision::Approve => Status::Accepted,
      Decision::Reject => Status::Rejected,
    }
  }
}

impl FromStr for Decision {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "approve" | "accept" | "accepted" => Ok(Decision::Approve),
      "reject" | "rejected" => Ok(Decision::Reject),
      _ => Err(Error::UnknownDecision(s.to_owned())),
    }
  }
}

/// A recipient registered against a pool.
///
/// Its status is intentionally absent: it lives on chain and is only
/// ever changed by submitting an allocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
  pub id: RecipientId,
  pub pool: PoolId,
  pub anchor: Address,
  pub requested_amount: U256,
  pub metadata: MetadataPointer,
}
