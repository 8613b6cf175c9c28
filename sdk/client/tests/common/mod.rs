use {
  alloy_primitives::{address, Address, Bytes, B256, U256},
  alloy_sol_types::{SolEvent, SolValue},
  async_trait::async_trait,
  grants_client_sdk::{
    ChainClient,
    DeployParams,
    Error,
    GrantFlowOrchestrator,
    IndexQuery,
    Indexer,
    OrchestratorConfig,
    PinningClient,
    Poller,
    ProfileRegistry,
  },
  grants_primitives::{
    ChainId,
    Log,
    MetadataPointer,
    ProfileId,
    Receipt,
    TransactionData,
    TxHash,
  },
  serde_json::Value,
  std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
  },
};

pub const STRATEGY: Address = address!("A9e9110fe3B4B169b2CA0e8825C7CE76EB0b9438");
pub const RECIPIENT: Address = address!("988Dd08C548d396A754649D998B4D5225C682B62");
pub const ANCHOR: Address = address!("75faf114eafb1BDbe2F0316DF893fd58CE46AA4d");

/// Pointers handed out by [`FakePinning`], in order.
pub const POINTERS: [&str; 2] = [
  "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG",
  "QmT78zSuBmuS4z925WZfrqQ1qHaJ56DQaTfyMUF7F8ff5o",
];

/// Turns a strategy event into the raw log a receipt would carry.
pub fn log(event: &impl SolEvent) -> Log {
  let data = event.encode_log_data();
  Log {
    address: STRATEGY,
    topics: data.topics().to_vec(),
    data: data.data,
  }
}

/// What the next mined transaction looks like.
pub enum Outcome {
  Mined(Vec<Log>),
  Reverted,
}

/// In-memory chain. Every transaction is mined immediately, its receipt
/// scripted through [`FakeChain::push_outcome`].
#[derive(Default)]
pub struct FakeChain {
  pub deployments: Mutex<Vec<DeployParams>>,
  pub sent: Mutex<Vec<TransactionData>>,
  pub confirmations: Mutex<Vec<u64>>,
  pub calls: Mutex<Vec<(Address, Bytes)>>,
  outcomes: Mutex<VecDeque<Outcome>>,
  receipts: Mutex<HashMap<TxHash, Receipt>>,
  deployed_address: Option<Address>,
  deployment_reverts: bool,
  pool_strategy: Address,
}

impl FakeChain {
  /// A chain where deployments land at [`STRATEGY`].
  pub fn new() -> Self {
    Self {
      deployed_address: Some(STRATEGY),
      pool_strategy: STRATEGY,
      ..Default::default()
    }
  }

  pub fn without_contract_address(mut self) -> Self {
    self.deployed_address = None;
    self
  }

  pub fn with_reverting_deployment(mut self) -> Self {
    self.deployment_reverts = true;
    self
  }

  /// Answers `getStrategy` the way Allo does for a pool it never created.
  pub fn without_pools(mut self) -> Self {
    self.pool_strategy = Address::ZERO;
    self
  }

  pub fn push_outcome(&self, outcome: Outcome) {
    self.outcomes.lock().unwrap().push_back(outcome);
  }

  pub fn sent(&self) -> Vec<TransactionData> {
    self.sent.lock().unwrap().clone()
  }

  fn mine(
    &self,
    success: bool,
    contract: Option<Address>,
    logs: Vec<Log>,
  ) -> TxHash {
    let mut receipts = self.receipts.lock().unwrap();
    let mined = receipts.len();
    let hash = B256::with_last_byte(mined as u8 + 1);
    receipts.insert(hash, Receipt {
      transaction_hash: hash,
      block_number: mined as u64 + 100,
      success,
      contract_address: contract,
      logs,
    });
    hash
  }
}

#[async_trait]
impl ChainClient for FakeChain {
  async fn deploy_contract(
    &self,
    params: &DeployParams,
  ) -> Result<TxHash, Error> {
    self.deployments.lock().unwrap().push(params.clone());
    Ok(self.mine(!self.deployment_reverts, self.deployed_address, vec![]))
  }

  async fn send_transaction(
    &self,
    tx: &TransactionData,
  ) -> Result<TxHash, Error> {
    self.sent.lock().unwrap().push(tx.clone());
    let outcome = self
      .outcomes
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or(Outcome::Mined(vec![]));

    Ok(match outcome {
      Outcome::Mined(logs) => self.mine(true, None, logs),
      Outcome::Reverted => self.mine(false, None, vec![]),
    })
  }

  async fn wait_for_transaction_receipt(
    &self,
    hash: TxHash,
    confirmations: u64,
  ) -> Result<Receipt, Error> {
    self.confirmations.lock().unwrap().push(confirmations);
    self
      .receipts
      .lock()
      .unwrap()
      .get(&hash)
      .cloned()
      .ok_or_else(|| Error::MalformedResponse(format!("unknown tx {hash}")))
  }

  /// Every call is answered as `getStrategy`.
  async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error> {
    self.calls.lock().unwrap().push((to, data));
    Ok(self.pool_strategy.abi_encode().into())
  }
}

/// Records pinned documents and hands out [`POINTERS`] round robin.
#[derive(Default)]
pub struct FakePinning {
  pub pinned: Mutex<Vec<Value>>,
  pub failing: bool,
}

impl FakePinning {
  pub fn failing() -> Self {
    Self {
      failing: true,
      ..Default::default()
    }
  }

  pub fn pinned(&self) -> Vec<Value> {
    self.pinned.lock().unwrap().clone()
  }
}

#[async_trait]
impl PinningClient for FakePinning {
  async fn pin_json(&self, document: &Value) -> Result<MetadataPointer, Error> {
    if self.failing {
      return Err(Error::HttpStatus {
        status: 503,
        url: "fake://pinning".into(),
      });
    }

    let mut pinned = self.pinned.lock().unwrap();
    let pointer = POINTERS[pinned.len() % POINTERS.len()];
    pinned.push(document.clone());
    Ok(pointer.parse()?)
  }
}

/// Indexer and profile registry in one. Entities become visible after a
/// configurable number of queries, `None` meaning never.
pub struct FakeIndexer {
  pub anchors: HashMap<ProfileId, Address>,
  pub indexed_after: Option<u32>,
  pub metadata_available: bool,
  pub queries: Mutex<Vec<IndexQuery>>,
  pub lookups: Mutex<Vec<ProfileId>>,
}

impl Default for FakeIndexer {
  fn default() -> Self {
    Self {
      anchors: HashMap::new(),
      indexed_after: Some(1),
      metadata_available: true,
      queries: Mutex::new(vec![]),
      lookups: Mutex::new(vec![]),
    }
  }
}

#[async_trait]
impl Indexer for FakeIndexer {
  async fn is_indexed(&self, query: &IndexQuery) -> Result<bool, Error> {
    let mut queries = self.queries.lock().unwrap();
    queries.push(query.clone());
    Ok(matches!(self.indexed_after, Some(n) if queries.len() as u32 >= n))
  }

  async fn is_metadata_available(
    &self,
    _: &MetadataPointer,
  ) -> Result<bool, Error> {
    Ok(self.metadata_available)
  }
}

#[async_trait]
impl ProfileRegistry for FakeIndexer {
  async fn profile_anchor(
    &self,
    _: ChainId,
    profile_id: &ProfileId,
  ) -> Result<Address, Error> {
    self.lookups.lock().unwrap().push(*profile_id);
    self
      .anchors
      .get(profile_id)
      .copied()
      .ok_or(Error::ProfileNotFound(*profile_id))
  }
}

pub fn config() -> OrchestratorConfig {
  OrchestratorConfig {
    strategy_bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
    pool_amount: U256::from(100_000_000_000_000u64),
    recipient_address: RECIPIENT,
    indexer_poll: Poller::new(Duration::from_millis(1), 3),
    ..Default::default()
  }
}

/// Collaborators are kept so tests can inspect what the flow did.
pub struct Harness {
  pub chain: Arc<FakeChain>,
  pub pinning: Arc<FakePinning>,
  pub indexer: Arc<FakeIndexer>,
  pub flow: GrantFlowOrchestrator,
}

impl Harness {
  pub fn new(
    config: OrchestratorConfig,
    chain: FakeChain,
    pinning: FakePinning,
    indexer: FakeIndexer,
  ) -> Self {
    let chain = Arc::new(chain);
    let pinning = Arc::new(pinning);
    let indexer = Arc::new(indexer);
    let flow = GrantFlowOrchestrator::new(
      config,
      chain.clone(),
      pinning.clone(),
      indexer.clone(),
      indexer.clone(),
    );

    Self {
      chain,
      pinning,
      indexer,
      flow,
    }
  }

  pub fn with_chain(chain: FakeChain) -> Self {
    Self::new(config(), chain, FakePinning::default(), FakeIndexer::default())
  }
}
