use {
  crate::{
    batch_set_allocator_data,
    decode_logs,
    extract_first,
    initialize_data,
    AllocationWindow,
    Allo,
    ChainClient,
    CreatePoolArgs,
    DeployParams,
    Error,
    EventKind,
    IndexQuery,
    Indexer,
    OrchestratorConfig,
    PinningClient,
    ProfileRegistry,
    RegisterRecipient,
    StrategyEvent,
    StrategyHandle,
  },
  alloy_primitives::Address,
  grants_primitives::{
    AllocatorEntry,
    ChainId,
    Decision,
    MetadataPointer,
    NewApplication,
    Pool,
    PoolId,
    PoolMetadata,
    ProfileId,
    Receipt,
    Recipient,
    RecipientId,
    StrategyInstance,
    TransactionData,
  },
  serde_json::json,
  std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
  },
  tracing::{error, info, warn},
};

/// Outcome of a successful application.
///
/// The recipient exists on chain once this is returned. `indexed` and
/// `metadata_available` tell whether the read side caught up within the
/// configured polling bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationReceipt {
  pub recipient: Recipient,
  pub indexed: bool,
  pub metadata_available: bool,
}

/// Drives the MicroGrants lifecycle: strategy deployment and pool
/// creation, allocator management, recipient registration and
/// allocation decisions.
///
/// Every operation is a strict sequence of network calls. Nothing is
/// cached between operations, all pool context is passed in explicitly.
pub struct GrantFlowOrchestrator {
  config: OrchestratorConfig,
  chain: Arc<dyn ChainClient>,
  pinning: Arc<dyn PinningClient>,
  profiles: Arc<dyn ProfileRegistry>,
  indexer: Arc<dyn Indexer>,
}

impl GrantFlowOrchestrator {
  pub fn new(
    config: OrchestratorConfig,
    chain: Arc<dyn ChainClient>,
    pinning: Arc<dyn PinningClient>,
    profiles: Arc<dyn ProfileRegistry>,
    indexer: Arc<dyn Indexer>,
  ) -> Self {
    Self {
      config,
      chain,
      pinning,
      profiles,
      indexer,
    }
  }

  pub fn config(&self) -> &OrchestratorConfig {
    &self.config
  }

  fn allo(&self) -> Allo {
    Allo::new(self.config.allo)
  }

  /// Deploys a fresh strategy contract and creates a pool bound to it,
  /// owned by `profile_id` and funded with the configured amount.
  ///
  /// Each call deploys a new contract and creates a new pool.
  pub async fn deploy_strategy(
    &self,
    profile_id: ProfileId,
    metadata: &MetadataPointer,
  ) -> Result<Pool, Error> {
    let kind = self.config.strategy.kind();
    info!("deploying {kind} strategy on behalf of {profile_id}");

    let address = self
      .deploy_contract()
      .await
      .map_err(|e| Error::Deployment(Box::new(e)))?;
    info!("{kind} strategy deployed at {address}");

    let window = AllocationWindow::starting_from(unix_now());
    let args = CreatePoolArgs {
      profile_id,
      strategy: address,
      init_strategy_data: initialize_data(&self.config.strategy, window),
      token: self.config.token,
      amount: self.config.pool_amount,
      metadata: metadata.clone(),
      managers: self.config.managers.clone(),
    };

    let receipt = self
      .submit(
        "pool creation",
        &self.allo().create_pool_with_custom_strategy(&args),
        self.config.pool_confirmations,
      )
      .await?;

    let events = decode_logs(&receipt.logs);
    let id = match extract_first(&events, EventKind::Initialized) {
      Some(StrategyEvent::Initialized(event)) => {
        u64::try_from(event.poolId).ok().map(PoolId)
      }
      _ => None,
    };

    let id = match id {
      Some(id) => {
        info!("created {id:?} with strategy {address}");
        id
      }
      None => {
        warn!(
          "pool creation {} emitted no usable Initialized event, reporting \
           {:?}",
          receipt.transaction_hash, self.config.fallback_pool_id
        );
        self.config.fallback_pool_id
      }
    };

    Ok(Pool {
      id,
      owner: profile_id,
      strategy: StrategyInstance {
        address,
        chain: self.config.chain,
        kind,
      },
      amount: self.config.pool_amount,
      token: self.config.token,
      metadata: metadata.clone(),
    })
  }

  /// Pins the descriptive document of a pool that is about to be created.
  pub async fn pin_pool_metadata(
    &self,
    metadata: &PoolMetadata,
  ) -> Result<MetadataPointer, Error> {
    let document = serde_json::to_value(metadata)?;
    let pointer = self
      .pinning
      .pin_json(&document)
      .await
      .map_err(|e| Error::Pinning(Box::new(e)))?;
    info!("pool metadata pinned as {pointer}");
    Ok(pointer)
  }

  /// Authorizes or revokes allocators on the strategy behind `pool_id`.
  pub async fn set_allocators(
    &self,
    pool_id: PoolId,
    entries: &[AllocatorEntry],
  ) -> Result<(), Error> {
    if entries.is_empty() {
      return Err(Error::NoAllocators);
    }

    let strategy = self
      .allo()
      .get_strategy(self.chain.as_ref(), pool_id)
      .await
      .inspect_err(|e| error!("strategy lookup of {pool_id:?} failed: {e}"))?;

    let tx = batch_set_allocator_data(strategy, entries);
    self
      .submit("allocator update", &tx, self.config.confirmations)
      .await
      .inspect_err(|e| error!("allocator update of {pool_id:?} failed: {e}"))?;

    for entry in entries {
      info!(
        "allocator {} {} on {pool_id:?}",
        entry.address,
        if entry.authorized { "authorized" } else { "revoked" }
      );
    }
    Ok(())
  }

  /// Pins the application metadata, registers the applicant as recipient
  /// of `pool_id` and waits for the indexer to pick it up.
  ///
  /// Returns `None` without doing anything when `chain` is not the
  /// supported network.
  pub async fn submit_application(
    &self,
    application: &NewApplication,
    chain: ChainId,
    pool_id: PoolId,
  ) -> Result<Option<ApplicationReceipt>, Error> {
    if chain != self.config.supported_chain {
      info!(
        "ignoring application for chain {chain}, only {} is supported",
        self.config.supported_chain
      );
      return Ok(None);
    }

    let metadata = self
      .pin_application(application)
      .await
      .map_err(|e| Error::Pinning(Box::new(e)))?;
    info!("application metadata pinned as {metadata}");

    let anchor = self
      .registry_anchor(chain, application.profile_id.as_deref())
      .await?;

    let request = RegisterRecipient {
      registry_anchor: anchor,
      recipient_address: self.config.recipient_address,
      requested_amount: application.requested_amount,
      metadata: metadata.clone(),
    };

    let id = self
      .register(pool_id, &request)
      .await
      .map_err(|e| Error::Registration(Box::new(e)))?;
    info!("registered recipient {id} on {pool_id:?}");

    let poller = self.config.indexer_poll;
    let query = IndexQuery::recipient(chain, pool_id, id);
    let indexed = match poller
      .until(&format!("indexing of recipient {id}"), || {
        self.indexer.is_indexed(&query)
      })
      .await
    {
      Ok(_) => true,
      Err(e) => {
        error!("{e}");
        false
      }
    };

    let metadata_available = match poller
      .until(&format!("availability of {metadata}"), || {
        self.indexer.is_metadata_available(&metadata)
      })
      .await
    {
      Ok(_) => true,
      Err(e) => {
        error!("{e}");
        false
      }
    };

    Ok(Some(ApplicationReceipt {
      recipient: Recipient {
        id,
        pool: pool_id,
        anchor,
        requested_amount: application.requested_amount,
        metadata,
      },
      indexed,
      metadata_available,
    }))
  }

  /// Records an allocator's decision on a recipient of `pool_id`.
  pub async fn allocate(
    &self,
    pool_id: PoolId,
    recipient: RecipientId,
    decision: Decision,
  ) -> Result<(), Error> {
    let tx = StrategyHandle::new(self.config.allo, pool_id)
      .allocation_data(recipient, decision.into());

    self
      .submit("allocation", &tx, self.config.confirmations)
      .await
      .inspect_err(|e| error!("allocation to {recipient} failed: {e}"))?;

    info!("recipient {recipient} of {pool_id:?}: {decision:?}");
    Ok(())
  }

  /// Waits until the indexer tracks `pool`. Returns the number of polls
  /// it took.
  pub async fn await_pool_indexed(&self, pool: &Pool) -> Result<u32, Error> {
    let query = IndexQuery::pool(pool.strategy.chain, pool.id);
    Ok(
      self
        .config
        .indexer_poll
        .until(&format!("indexing of {:?}", pool.id), || {
          self.indexer.is_indexed(&query)
        })
        .await?,
    )
  }

  async fn deploy_contract(&self) -> Result<Address, Error> {
    let params = DeployParams::new(
      self.config.strategy.kind(),
      self.config.strategy_bytecode.clone(),
      self.config.allo,
    )?;

    let hash = self.chain.deploy_contract(&params).await?;
    info!("strategy deployment submitted as {hash}");

    let receipt = self
      .chain
      .wait_for_transaction_receipt(hash, self.config.confirmations)
      .await?;
    if !receipt.success {
      return Err(Error::Reverted(hash));
    }

    receipt
      .contract_address
      .ok_or(Error::MissingContractAddress(hash))
  }

  /// Pins an inline image on its own first, so the application document
  /// only carries its pointer.
  async fn pin_application(
    &self,
    application: &NewApplication,
  ) -> Result<MetadataPointer, Error> {
    let mut metadata = application.metadata();
    if metadata.has_inline_image() {
      let image = self
        .pinning
        .pin_json(&json!({ "data": metadata.base64_image }))
        .await?;
      info!("application image pinned as {image}");
      metadata.base64_image = image.to_string();
    }

    self.pinning.pin_json(&serde_json::to_value(&metadata)?).await
  }

  async fn registry_anchor(
    &self,
    chain: ChainId,
    profile_id: Option<&str>,
  ) -> Result<Address, Error> {
    match profile_id {
      Some(id) if ProfileId::is_hash(id) => {
        let id: ProfileId = id.to_lowercase().parse()?;
        self.profiles.profile_anchor(chain, &id).await
      }
      _ => Ok(Address::ZERO),
    }
  }

  async fn register(
    &self,
    pool_id: PoolId,
    request: &RegisterRecipient,
  ) -> Result<RecipientId, Error> {
    let tx = StrategyHandle::new(self.config.allo, pool_id)
      .register_recipient_data(request);
    let receipt = self
      .submit("recipient registration", &tx, self.config.confirmations)
      .await?;

    let events = decode_logs(&receipt.logs);
    let event = extract_first(&events, EventKind::Registered)
      .or_else(|| extract_first(&events, EventKind::UpdatedRegistration));

    match event {
      Some(StrategyEvent::Registered(e)) => Ok(e.recipientId.into()),
      Some(StrategyEvent::UpdatedRegistration(e)) => {
        warn!(
          "registration {} reported an update of recipient {}",
          receipt.transaction_hash, e.recipientId
        );
        Ok(e.recipientId.into())
      }
      _ => Err(Error::MissingEvent("Registered or UpdatedRegistration")),
    }
  }

  async fn submit(
    &self,
    what: &str,
    tx: &TransactionData,
    confirmations: u64,
  ) -> Result<Receipt, Error> {
    let hash = self.chain.send_transaction(tx).await?;
    info!("{what} submitted as {hash}");

    let receipt = self
      .chain
      .wait_for_transaction_receipt(hash, confirmations)
      .await?;
    if !receipt.success {
      return Err(Error::Reverted(hash));
    }

    info!("{what} confirmed in block {}", receipt.block_number);
    Ok(receipt)
  }
}

fn unix_now() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| elapsed.as_secs())
    .unwrap_or_default()
}
