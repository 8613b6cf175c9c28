use {
  crate::PollError,
  grants_primitives::{PoolId, ProfileId, StrategyType, TxHash},
  thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("HTTP transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Unexpected HTTP status {status} from {url}")]
  HttpStatus { status: u16, url: String },

  #[error("JSON-RPC error {code}: {message}")]
  Rpc { code: i64, message: String },

  #[error("GraphQL error: {0}")]
  Graphql(String),

  #[error("Malformed response: {0}")]
  MalformedResponse(String),

  #[error("Transaction {0} reverted")]
  Reverted(TxHash),

  #[error("Contract creation {0} did not report a contract address")]
  MissingContractAddress(TxHash),

  #[error("Expected event {0} not found in transaction logs")]
  MissingEvent(&'static str),

  #[error("Strategy deployment failed: {0}")]
  Deployment(Box<Error>),

  #[error("Recipient registration failed: {0}")]
  Registration(Box<Error>),

  #[error("Pinning metadata failed: {0}")]
  Pinning(Box<Error>),

  #[error("At least one allocator entry is required")]
  NoAllocators,

  #[error("{0:?} does not exist, Allo reports no strategy for it")]
  UnknownPool(PoolId),

  #[error("Profile {0} not found in registry")]
  ProfileNotFound(ProfileId),

  #[error("No bytecode configured for strategy {0}")]
  MissingBytecode(StrategyType),

  #[error("Invalid strategy artifact: {0}")]
  Artifact(String),

  #[error(transparent)]
  Poll(#[from] PollError),

  #[error("ABI error: {0}")]
  Abi(#[from] alloy_sol_types::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Primitives(#[from] grants_primitives::Error),
}
