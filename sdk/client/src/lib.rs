pub mod abi;
mod allo;
mod chain;
mod config;
mod error;
mod events;
mod indexer;
mod ipfs;
mod orchestrator;
mod poll;
mod strategy;

pub use {
  allo::{Allo, CreatePoolArgs, ALLO_ADDRESS, NATIVE},
  chain::{ChainClient, JsonRpcChainClient},
  config::OrchestratorConfig,
  error::Error,
  events::{decode_logs, extract_first, EventKind, StrategyEvent},
  indexer::{GraphqlIndexer, IndexQuery, Indexer, ProfileRegistry},
  ipfs::{PinataClient, PinningClient},
  orchestrator::{ApplicationReceipt, GrantFlowOrchestrator},
  poll::{PollError, Poller},
  strategy::{
    batch_set_allocator_data,
    bytecode_from_artifact,
    initialize_data,
    AllocationWindow,
    DeployParams,
    RegisterRecipient,
    StrategyHandle,
    StrategyVariant,
    ALLOCATION_DURATION,
    ALLOCATION_LEAD_TIME,
    APPROVAL_THRESHOLD,
    MAX_REQUESTED_AMOUNT,
  },
};
