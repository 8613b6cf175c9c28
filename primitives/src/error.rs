use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Invalid profile id {0}. Expected a 0x-prefixed 32 byte hash")]
  InvalidProfileId(String),

  #[error("Invalid metadata pointer {0}: {1}")]
  InvalidPointer(String, cid::Error),

  #[error("Invalid recipient status {0}")]
  InvalidStatus(u8),

  #[error("Unknown strategy type {0}")]
  UnknownStrategyType(String),

  #[error("Unknown allocation decision {0}. Expected approve or reject")]
  UnknownDecision(String),
}
