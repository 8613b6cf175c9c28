mod common;
use {
  alloy_primitives::{Address, Bytes, B256, U256},
  alloy_sol_types::{sol_data, SolCall, SolType},
  common::{
    log,
    FakeChain,
    FakeIndexer,
    FakePinning,
    Harness,
    Outcome,
    ANCHOR,
    POINTERS,
    RECIPIENT,
  },
  grants_client_sdk::{
    abi::{self, IAllo, MicroGrantsStrategy},
    Error,
  },
  grants_primitives::{
    ChainId,
    NewApplication,
    PoolId,
    ProfileId,
    RecipientId,
    TransactionData,
  },
  std::collections::HashMap,
};

const POOL: PoolId = PoolId(26);

fn application() -> NewApplication {
  NewApplication {
    profile_id: None,
    name: "Rust tooling".into(),
    website: "https://example.org".into(),
    description: "Keeps the build green".into(),
    email: "team@example.org".into(),
    base64_image: POINTERS[1].into(),
    requested_amount: U256::from(5_000),
  }
}

fn registered(recipient: Address) -> Outcome {
  Outcome::Mined(vec![log(&MicroGrantsStrategy::Registered {
    recipientId: recipient,
    data: Bytes::new(),
    sender: RECIPIENT,
  })])
}

fn updated(recipient: Address) -> MicroGrantsStrategy::UpdatedRegistration {
  MicroGrantsStrategy::UpdatedRegistration {
    recipientId: recipient,
    data: Bytes::new(),
    sender: RECIPIENT,
    status: 1,
  }
}

/// Anchor and metadata pointer sent in a `registerRecipient` transaction.
fn registration_payload(tx: &TransactionData) -> (Address, U256, String) {
  let call = IAllo::registerRecipientCall::abi_decode(&tx.data, true).unwrap();
  type Payload = (
    sol_data::Address,
    sol_data::Address,
    sol_data::Uint<256>,
    abi::Metadata,
  );
  let (anchor, _, amount, metadata) =
    <Payload as SolType>::abi_decode_params(&call._data, true).unwrap();
  (anchor, amount, metadata.pointer)
}

#[tokio::test]
async fn unsupported_chain_is_ignored() -> anyhow::Result<()> {
  let harness = Harness::with_chain(FakeChain::new());
  let result = harness
    .flow
    .submit_application(&application(), ChainId(1), POOL)
    .await?;

  assert!(result.is_none());
  assert!(harness.pinning.pinned().is_empty());
  assert!(harness.chain.sent().is_empty());
  Ok(())
}

#[tokio::test]
async fn registers_and_waits_for_indexer() -> anyhow::Result<()> {
  let recipient = Address::repeat_byte(0x33);
  let chain = FakeChain::new();
  chain.push_outcome(registered(recipient));
  let harness = Harness::new(
    common::config(),
    chain,
    FakePinning::default(),
    FakeIndexer {
      indexed_after: Some(2),
      ..Default::default()
    },
  );

  let receipt = harness
    .flow
    .submit_application(&application(), ChainId::ARBITRUM_SEPOLIA, POOL)
    .await?
    .expect("supported chain");

  assert_eq!(receipt.recipient.id, RecipientId(recipient));
  assert_eq!(receipt.recipient.pool, POOL);
  assert_eq!(receipt.recipient.anchor, Address::ZERO);
  assert_eq!(receipt.recipient.metadata.as_str(), POINTERS[0]);
  assert!(receipt.indexed);
  assert!(receipt.metadata_available);

  let sent = harness.chain.sent();
  assert_eq!(sent.len(), 1);
  let call = IAllo::registerRecipientCall::abi_decode(&sent[0].data, true)?;
  assert_eq!(call._poolId, U256::from(26));
  let (_, amount, pointer) = registration_payload(&sent[0]);
  assert_eq!(amount, U256::from(5_000));
  assert_eq!(pointer, POINTERS[0]);

  let queries = harness.indexer.queries.lock().unwrap().clone();
  assert_eq!(queries.len(), 2);
  assert_eq!(queries[0].entity, "microGrantRecipient");
  Ok(())
}

#[tokio::test]
async fn registered_wins_over_updated_registration() -> anyhow::Result<()> {
  let updated_id = Address::repeat_byte(0x01);
  let registered_id = Address::repeat_byte(0x02);
  let chain = FakeChain::new();
  chain.push_outcome(Outcome::Mined(vec![
    log(&updated(updated_id)),
    log(&MicroGrantsStrategy::Registered {
      recipientId: registered_id,
      data: Bytes::new(),
      sender: RECIPIENT,
    }),
  ]));
  let harness = Harness::with_chain(chain);

  let receipt = harness
    .flow
    .submit_application(&application(), ChainId::ARBITRUM_SEPOLIA, POOL)
    .await?
    .expect("supported chain");
  assert_eq!(receipt.recipient.id, RecipientId(registered_id));
  Ok(())
}

#[tokio::test]
async fn updated_registration_is_accepted_alone() -> anyhow::Result<()> {
  let updated_id = Address::repeat_byte(0x01);
  let chain = FakeChain::new();
  chain.push_outcome(Outcome::Mined(vec![log(&updated(updated_id))]));
  let harness = Harness::with_chain(chain);

  let receipt = harness
    .flow
    .submit_application(&application(), ChainId::ARBITRUM_SEPOLIA, POOL)
    .await?
    .expect("supported chain");
  assert_eq!(receipt.recipient.id, RecipientId(updated_id));
  Ok(())
}

#[tokio::test]
async fn registration_without_event_fails() -> anyhow::Result<()> {
  let chain = FakeChain::new();
  chain.push_outcome(Outcome::Mined(vec![]));
  let harness = Harness::with_chain(chain);

  let result = harness
    .flow
    .submit_application(&application(), ChainId::ARBITRUM_SEPOLIA, POOL)
    .await;
  match result {
    Err(Error::Registration(inner)) => assert!(matches!(
      *inner,
      Error::MissingEvent("Registered or UpdatedRegistration")
    )),
    other => panic!("unexpected {other:?}"),
  }
  assert!(harness.indexer.queries.lock().unwrap().is_empty());
  Ok(())
}

#[tokio::test]
async fn reverted_registration_fails() -> anyhow::Result<()> {
  let chain = FakeChain::new();
  chain.push_outcome(Outcome::Reverted);
  let harness = Harness::with_chain(chain);

  let result = harness
    .flow
    .submit_application(&application(), ChainId::ARBITRUM_SEPOLIA, POOL)
    .await;
  match result {
    Err(Error::Registration(inner)) => {
      assert!(matches!(*inner, Error::Reverted(_)))
    }
    other => panic!("unexpected {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn hash_profile_id_resolves_anchor() -> anyhow::Result<()> {
  let profile = ProfileId(B256::repeat_byte(0xab));
  let chain = FakeChain::new();
  chain.push_outcome(registered(Address::repeat_byte(0x33)));
  let harness = Harness::new(
    common::config(),
    chain,
    FakePinning::default(),
    FakeIndexer {
      anchors: HashMap::from([(profile, ANCHOR)]),
      ..Default::default()
    },
  );

  let mut app = application();
  app.profile_id = Some(profile.to_string().to_uppercase().replace("0X", "0x"));

  let receipt = harness
    .flow
    .submit_application(&app, ChainId::ARBITRUM_SEPOLIA, POOL)
    .await?
    .expect("supported chain");

  assert_eq!(receipt.recipient.anchor, ANCHOR);
  assert_eq!(*harness.indexer.lookups.lock().unwrap(), vec![profile]);
  let (anchor, _, _) = registration_payload(&harness.chain.sent()[0]);
  assert_eq!(anchor, ANCHOR);
  Ok(())
}

#[tokio::test]
async fn other_profile_ids_use_zero_anchor() -> anyhow::Result<()> {
  let chain = FakeChain::new();
  chain.push_outcome(registered(Address::repeat_byte(0x33)));
  let harness = Harness::with_chain(chain);

  let mut app = application();
  app.profile_id = Some("my-project".into());

  let receipt = harness
    .flow
    .submit_application(&app, ChainId::ARBITRUM_SEPOLIA, POOL)
    .await?
    .expect("supported chain");

  assert_eq!(receipt.recipient.anchor, Address::ZERO);
  assert!(harness.indexer.lookups.lock().unwrap().is_empty());
  let (anchor, _, _) = registration_payload(&harness.chain.sent()[0]);
  assert_eq!(anchor, Address::ZERO);
  Ok(())
}

#[tokio::test]
async fn inline_image_is_pinned_separately() -> anyhow::Result<()> {
  let chain = FakeChain::new();
  chain.push_outcome(registered(Address::repeat_byte(0x33)));
  let harness = Harness::with_chain(chain);

  let mut app = application();
  app.base64_image = "data:image/png;base64,iVBORw0KGgo=".into();

  let receipt = harness
    .flow
    .submit_application(&app, ChainId::ARBITRUM_SEPOLIA, POOL)
    .await?
    .expect("supported chain");

  let pinned = harness.pinning.pinned();
  assert_eq!(pinned.len(), 2);
  assert_eq!(pinned[0]["data"], "data:image/png;base64,iVBORw0KGgo=");
  assert_eq!(pinned[1]["base64Image"], POINTERS[0]);
  assert_eq!(pinned[1]["name"], "Rust tooling");
  assert_eq!(receipt.recipient.metadata.as_str(), POINTERS[1]);
  Ok(())
}

#[tokio::test]
async fn referenced_image_is_pinned_once() -> anyhow::Result<()> {
  let chain = FakeChain::new();
  chain.push_outcome(registered(Address::repeat_byte(0x33)));
  let harness = Harness::with_chain(chain);

  harness
    .flow
    .submit_application(&application(), ChainId::ARBITRUM_SEPOLIA, POOL)
    .await?;

  let pinned = harness.pinning.pinned();
  assert_eq!(pinned.len(), 1);
  assert_eq!(pinned[0]["base64Image"], POINTERS[1]);
  Ok(())
}

#[tokio::test]
async fn pinning_failure_aborts_before_chain() -> anyhow::Result<()> {
  let harness = Harness::new(
    common::config(),
    FakeChain::new(),
    FakePinning::failing(),
    FakeIndexer::default(),
  );

  let result = harness
    .flow
    .submit_application(&application(), ChainId::ARBITRUM_SEPOLIA, POOL)
    .await;
  assert!(matches!(result, Err(Error::Pinning(_))));
  assert!(harness.chain.sent().is_empty());
  Ok(())
}

#[tokio::test]
async fn indexer_timeout_is_reported_not_raised() -> anyhow::Result<()> {
  let recipient = Address::repeat_byte(0x33);
  let chain = FakeChain::new();
  chain.push_outcome(registered(recipient));
  let harness = Harness::new(
    common::config(),
    chain,
    FakePinning::default(),
    FakeIndexer {
      indexed_after: None,
      metadata_available: false,
      ..Default::default()
    },
  );

  let receipt = harness
    .flow
    .submit_application(&application(), ChainId::ARBITRUM_SEPOLIA, POOL)
    .await?
    .expect("supported chain");

  assert_eq!(receipt.recipient.id, RecipientId(recipient));
  assert!(!receipt.indexed);
  assert!(!receipt.metadata_available);
  // bounded by the configured poller
  assert_eq!(harness.indexer.queries.lock().unwrap().len(), 3);
  Ok(())
}
