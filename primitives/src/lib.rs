mod allocator;
mod error;
mod ids;
mod metadata;
mod pointer;
mod pool;
mod recipient;
mod transaction;

pub use {
  allocator::AllocatorEntry,
  alloy_primitives::{Address, Bytes, B256, U256},
  error::Error,
  ids::{ChainId, PoolId, ProfileId, RecipientId},
  metadata::{ApplicationMetadata, NewApplication, PoolMetadata},
  pointer::{MetadataPointer, IPFS_PROTOCOL},
  pool::{Pool, StrategyInstance, StrategyType},
  recipient::{Decision, Recipient, Status},
  transaction::{Log, Receipt, TransactionData, TxHash},
};

/// Hex encoding with a `0x` prefix, lower-case.
///
/// Indexers and the profile registry key their records by lower-case hex,
/// so every identifier that leaves this process goes through here.
pub fn to_lower_hex(bytes: impl AsRef<[u8]>) -> String {
  format!("0x{}", hex::encode(bytes))
}
