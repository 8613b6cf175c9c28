use {
  alloy_primitives::{Address, Bytes, U256},
  anyhow::Context,
  clap::{Parser, Subcommand},
  grants_client_sdk::{
    bytecode_from_artifact,
    GraphqlIndexer,
    JsonRpcChainClient,
    OrchestratorConfig,
    PinataClient,
    Poller,
    StrategyVariant,
  },
  grants_primitives::{
    ChainId,
    Decision,
    MetadataPointer,
    PoolId,
    ProfileId,
    RecipientId,
    StrategyType,
  },
  humantime::Duration,
  std::{convert::Infallible, fmt::Debug, path::PathBuf, str::FromStr},
};

/// Allo v2 MicroGrants client
///
/// Deploys MicroGrants strategies, creates pools, manages allocators,
/// submits applications and records allocation decisions. Transactions
/// are signed by the wallet behind the RPC endpoint for `--sender`.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// JSON-RPC endpoint able to sign for the sender account
  #[clap(long, env = "MICROGRANTS_RPC_URL",
    value_name = "URL",
    default_value = "https://sepolia-rollup.arbitrum.io/rpc")]
  rpc_url: String,

  /// Account every transaction is sent from
  #[clap(long, env = "MICROGRANTS_SENDER", value_name = "ADDRESS")]
  sender: Address,

  /// Network the RPC endpoint is connected to
  #[clap(long, env = "MICROGRANTS_CHAIN_ID",
    value_name = "ID",
    default_value = "421614")]
  chain_id: ChainId,

  /// Allo v2 pool registry
  #[clap(long, env = "MICROGRANTS_ALLO",
    value_name = "ADDRESS",
    default_value = "0x1133eA7Af70876e64665ecD07C0A0476d09465a1")]
  allo: Address,

  /// GraphQL endpoint of the Allo indexer
  #[clap(long, env = "MICROGRANTS_GRAPHQL_URL", value_name = "URL")]
  graphql_url: String,

  /// JWT of the Pinata pinning API
  #[clap(long, env = "PINATA_JWT", value_name = "TOKEN")]
  pinata_jwt: Secret,

  #[clap(long, env = "PINATA_API_URL",
    value_name = "URL",
    default_value = PinataClient::DEFAULT_API_URL)]
  pinata_url: String,

  /// IPFS gateway used to check that pinned metadata is retrievable
  #[clap(long, env = "MICROGRANTS_IPFS_GATEWAY",
    value_name = "URL",
    default_value = GraphqlIndexer::DEFAULT_IPFS_GATEWAY)]
  ipfs_gateway: String,

  /// Hardhat or Foundry artifact holding the strategy creation bytecode,
  /// required by `deploy` and `demo`
  #[clap(long, env = "MICROGRANTS_STRATEGY_ARTIFACT", value_name = "PATH")]
  artifact: Option<PathBuf>,

  /// Strategy flavour of new pools: microgrants, hats or gov
  #[clap(long, value_name = "TYPE", default_value = "microgrants")]
  strategy: StrategyType,

  /// Hats protocol contract, hats strategy only
  #[clap(long, value_name = "ADDRESS")]
  hats: Option<Address>,

  /// Hat whose wearers may allocate, hats strategy only
  #[clap(long, value_name = "ID")]
  hat_id: Option<U256>,

  /// Governance token, gov strategy only
  #[clap(long, value_name = "ADDRESS")]
  gov: Option<Address>,

  /// Block or timestamp voting power is read at, gov strategy only
  #[clap(long, value_name = "REF")]
  snapshot_reference: Option<U256>,

  /// Voting power needed to allocate, gov strategy only
  #[clap(long, value_name = "AMOUNT")]
  min_vote_power: Option<U256>,

  /// Funding of new pools in wei
  #[clap(long, value_name = "WEI", default_value = "100000000000000")]
  pool_amount: U256,

  /// Pool managers besides the creator
  #[clap(long, value_name = "ADDRESS")]
  manager: Vec<Address>,

  /// Address paid out to accepted applicants, defaults to the sender
  #[clap(long, value_name = "ADDRESS")]
  recipient_address: Option<Address>,

  /// Interval between receipt polls
  #[clap(long, value_name = "DURATION", default_value = "1s")]
  receipt_interval: Duration,

  #[clap(long, value_name = "COUNT", default_value = "120")]
  receipt_attempts: u32,

  /// Interval between indexer and gateway polls
  #[clap(long, value_name = "DURATION", default_value = "2s")]
  poll_interval: Duration,

  #[clap(long, value_name = "COUNT", default_value = "30")]
  poll_attempts: u32,

  #[clap(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Deploy a strategy and create a pool bound to it
  Deploy {
    /// Registry profile owning the pool
    #[clap(long)]
    profile_id: ProfileId,

    /// Already pinned pool metadata, pinned from name and description
    /// when absent
    #[clap(long)]
    metadata: Option<MetadataPointer>,

    #[clap(long, default_value = "MicroGrants pool")]
    name: String,

    #[clap(long, default_value = "")]
    description: String,
  },

  /// Authorize or revoke allocators of a pool
  SetAllocators {
    #[clap(long)]
    pool_id: PoolId,

    #[clap(long, value_name = "ADDRESS")]
    authorize: Vec<Address>,

    #[clap(long, value_name = "ADDRESS")]
    revoke: Vec<Address>,
  },

  /// Register an application against a pool
  Apply {
    #[clap(long)]
    pool_id: PoolId,

    /// JSON file with the application
    #[clap(long, value_name = "PATH")]
    application: PathBuf,
  },

  /// Approve or reject a recipient
  Allocate {
    #[clap(long)]
    pool_id: PoolId,

    #[clap(long)]
    recipient: RecipientId,

    /// approve or reject
    #[clap(long)]
    decision: Decision,
  },

  /// Run the whole flow once: create a pool, authorize the sender as
  /// allocator, apply and approve the application
  Demo {
    #[clap(long)]
    profile_id: ProfileId,

    #[clap(long, value_name = "PATH")]
    application: PathBuf,
  },
}

/// A credential that never shows up in logs.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
  pub fn expose(&self) -> &str {
    &self.0
  }
}

impl Debug for Secret {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Secret(***)")
  }
}

impl FromStr for Secret {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(s.to_owned()))
  }
}

impl SystemSettings {
  pub fn command(&self) -> &Command {
    &self.command
  }

  pub fn chain_id(&self) -> ChainId {
    self.chain_id
  }

  pub fn sender(&self) -> Address {
    self.sender
  }

  pub fn chain_client(&self, http: reqwest::Client) -> JsonRpcChainClient {
    JsonRpcChainClient::new(
      http,
      &self.rpc_url,
      self.sender,
      Poller::new(self.receipt_interval.into(), self.receipt_attempts),
    )
  }

  pub fn pinning_client(&self, http: reqwest::Client) -> PinataClient {
    PinataClient::new(http, &self.pinata_url, self.pinata_jwt.expose())
  }

  pub fn indexer(&self, http: reqwest::Client) -> GraphqlIndexer {
    GraphqlIndexer::new(http, &self.graphql_url, &self.ipfs_gateway)
  }

  pub fn orchestrator_config(&self) -> anyhow::Result<OrchestratorConfig> {
    Ok(OrchestratorConfig {
      chain: self.chain_id,
      allo: self.allo,
      strategy: self.strategy_variant()?,
      strategy_bytecode: self.strategy_bytecode()?,
      pool_amount: self.pool_amount,
      managers: self.manager.clone(),
      recipient_address: self.recipient_address.unwrap_or(self.sender),
      indexer_poll: Poller::new(self.poll_interval.into(), self.poll_attempts),
      ..Default::default()
    })
  }

  fn strategy_variant(&self) -> anyhow::Result<StrategyVariant> {
    Ok(match self.strategy {
      StrategyType::MicroGrants => StrategyVariant::MicroGrants,
      StrategyType::Hats => StrategyVariant::Hats {
        hats: self.hats.context("--hats is required by the hats strategy")?,
        hat_id: self
          .hat_id
          .context("--hat-id is required by the hats strategy")?,
      },
      StrategyType::Gov => StrategyVariant::Gov {
        gov: self.gov.context("--gov is required by the gov strategy")?,
        snapshot_reference: self
          .snapshot_reference
          .context("--snapshot-reference is required by the gov strategy")?,
        min_vote_power: self
          .min_vote_power
          .context("--min-vote-power is required by the gov strategy")?,
      },
    })
  }

  fn strategy_bytecode(&self) -> anyhow::Result<Bytes> {
    let Some(path) = &self.artifact else {
      return Ok(Bytes::new());
    };

    let artifact = std::fs::read_to_string(path)
      .with_context(|| format!("reading {}", path.display()))?;
    Ok(bytecode_from_artifact(&artifact)?)
  }
}
