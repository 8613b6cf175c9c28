use {
  alloy_primitives::{Address, Bytes, B256, U256},
  serde::{Deserialize, Serialize},
};

pub type TxHash = B256;

/// A prepared contract call, ready to be signed and submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
  pub to: Address,
  pub data: Bytes,
  pub value: U256,
}

/// A raw event log as found in a transaction receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
  pub address: Address,
  pub topics: Vec<B256>,
  pub data: Bytes,
}

/// Outcome of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
  pub transaction_hash: TxHash,
  pub block_number: u64,

  /// False when the transaction was mined but reverted.
  pub success: bool,

  /// Only present for contract creation transactions.
  pub contract_address: Option<Address>,

  pub logs: Vec<Log>,
}
