use {
  crate::{Poller, StrategyVariant, ALLO_ADDRESS, NATIVE},
  alloy_primitives::{Address, Bytes, U256},
  grants_primitives::{ChainId, PoolId},
  std::time::Duration,
};

/// Settings of the grant flow that are fixed for the lifetime of an
/// orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
  /// Network the chain client is connected to. Pools created by the
  /// orchestrator are recorded and looked up in the indexer on it.
  pub chain: ChainId,

  /// Applications are only submitted on this network. Requests naming any
  /// other chain are ignored.
  pub supported_chain: ChainId,

  /// Address of the Allo pool registry.
  pub allo: Address,

  /// Strategy flavour deployed for new pools, with its extra
  /// initialization parameters.
  pub strategy: StrategyVariant,

  /// Creation bytecode of the strategy contract, without constructor
  /// arguments.
  pub strategy_bytecode: Bytes,

  /// Token new pools are funded with, [`NATIVE`] for the network currency.
  pub token: Address,

  /// Funding of every new pool, in base units of `token`.
  pub pool_amount: U256,

  /// Pool managers besides the creator.
  pub managers: Vec<Address>,

  /// Address receiving the funds of an accepted recipient.
  pub recipient_address: Address,

  /// Confirmations awaited for every transaction except pool creation.
  pub confirmations: u64,

  /// Confirmations awaited for the pool creation transaction, the pool
  /// id is read from its logs.
  pub pool_confirmations: u64,

  /// Reported as the pool id when the pool creation receipt carries no
  /// `Initialized` event. Allo never assigns id 0 to a real pool.
  pub fallback_pool_id: PoolId,

  /// Bounds the wait for the indexer and the IPFS gateway after a
  /// recipient is registered.
  pub indexer_poll: Poller,
}

impl Default for OrchestratorConfig {
  fn default() -> Self {
    Self {
      chain: ChainId::ARBITRUM_SEPOLIA,
      supported_chain: ChainId::ARBITRUM_SEPOLIA,
      allo: ALLO_ADDRESS,
      strategy: StrategyVariant::MicroGrants,
      strategy_bytecode: Bytes::new(),
      token: NATIVE,
      pool_amount: U256::from(100_000_000_000_000u64), // 0.0001 ETH
      managers: vec![],
      recipient_address: Address::ZERO,
      confirmations: 1,
      pool_confirmations: 2,
      fallback_pool_id: PoolId(0),
      indexer_poll: Poller::new(Duration::from_secs(2), 30),
    }
  }
}
