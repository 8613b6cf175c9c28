use {
  crate::{
    abi::{self, IAllo, MicroGrantsStrategy},
    Error,
  },
  alloy_primitives::{Address, Bytes, U256},
  alloy_sol_types::{sol_data, SolCall, SolConstructor, SolType, SolValue},
  grants_primitives::{
    AllocatorEntry,
    MetadataPointer,
    PoolId,
    RecipientId,
    Status,
    StrategyType,
    TransactionData,
    IPFS_PROTOCOL,
  },
  serde_json::Value,
};

/// Seconds between pool creation and the opening of allocations. Leaves
/// room for the pool creation transaction itself to be mined.
pub const ALLOCATION_LEAD_TIME: u64 = 300;

/// Seconds between pool creation and the closing of allocations.
pub const ALLOCATION_DURATION: u64 = 10_000;

/// Number of approvals a recipient needs to be accepted.
pub const APPROVAL_THRESHOLD: u64 = 1;

/// Largest amount a single recipient may request, in token base units.
pub const MAX_REQUESTED_AMOUNT: u64 = 10_000_000_000_000;

/// Allocation period of a pool, unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationWindow {
  pub start: u64,
  pub end: u64,
}

impl AllocationWindow {
  pub fn starting_from(now: u64) -> Self {
    Self {
      start: now + ALLOCATION_LEAD_TIME,
      end: now + ALLOCATION_DURATION,
    }
  }
}

/// A MicroGrants strategy flavour together with the extra initialization
/// parameters that flavour needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyVariant {
  MicroGrants,
  Hats {
    hats: Address,
    hat_id: U256,
  },
  Gov {
    gov: Address,
    snapshot_reference: U256,
    min_vote_power: U256,
  },
}

impl StrategyVariant {
  pub fn kind(&self) -> StrategyType {
    match self {
      StrategyVariant::MicroGrants => StrategyType::MicroGrants,
      StrategyVariant::Hats { .. } => StrategyType::Hats,
      StrategyVariant::Gov { .. } => StrategyType::Gov,
    }
  }
}

/// Everything needed to submit the contract creation transaction of a
/// strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployParams {
  pub kind: StrategyType,
  pub bytecode: Bytes,
  pub constructor_args: Bytes,
}

impl DeployParams {
  /// Strategies are constructed with the Allo contract they serve and
  /// their strategy name.
  pub fn new(
    kind: StrategyType,
    bytecode: Bytes,
    allo: Address,
  ) -> Result<Self, Error> {
    if bytecode.is_empty() {
      return Err(Error::MissingBytecode(kind));
    }

    let constructor_args = MicroGrantsStrategy::constructorCall {
      _allo: allo,
      _name: kind.name().to_owned(),
    }
    .abi_encode();

    Ok(Self {
      kind,
      bytecode,
      constructor_args: constructor_args.into(),
    })
  }

  /// Bytecode followed by the encoded constructor arguments, the payload
  /// of a contract creation transaction.
  pub fn creation_code(&self) -> Bytes {
    let mut code = self.bytecode.to_vec();
    code.extend_from_slice(&self.constructor_args);
    code.into()
  }
}

/// Extracts creation bytecode from a compiler artifact.
///
/// Accepts both the Hardhat layout (`"bytecode": "0x..."`) and the Foundry
/// layout (`"bytecode": { "object": "0x..." }`).
pub fn bytecode_from_artifact(artifact: &str) -> Result<Bytes, Error> {
  let json: Value = serde_json::from_str(artifact)?;
  let raw = match &json["bytecode"] {
    Value::String(code) => code.as_str(),
    Value::Object(obj) => obj
      .get("object")
      .and_then(Value::as_str)
      .ok_or_else(|| Error::Artifact("bytecode.object is missing".into()))?,
    _ => return Err(Error::Artifact("bytecode is missing".into())),
  };

  let bytecode: Bytes = raw
    .parse()
    .map_err(|e| Error::Artifact(format!("bytecode is not valid hex: {e}")))?;

  if bytecode.is_empty() {
    return Err(Error::Artifact("bytecode is empty".into()));
  }
  Ok(bytecode)
}

/// Encodes the strategy initialization payload that Allo forwards to the
/// strategy when the pool is created.
pub fn initialize_data(
  variant: &StrategyVariant,
  window: AllocationWindow,
) -> Bytes {
  let params = abi::InitializeParams {
    useRegistryAnchor: true,
    allocationStartTime: window.start,
    allocationEndTime: window.end,
    approvalThreshold: U256::from(APPROVAL_THRESHOLD),
    maxRequestedAmount: U256::from(MAX_REQUESTED_AMOUNT),
  };

  let encoded = match variant {
    StrategyVariant::MicroGrants => params.abi_encode(),
    StrategyVariant::Hats { hats, hat_id } => abi::InitializeParamsHats {
      params,
      hats: *hats,
      hatId: *hat_id,
    }
    .abi_encode(),
    StrategyVariant::Gov {
      gov,
      snapshot_reference,
      min_vote_power,
    } => abi::InitializeParamsGov {
      params,
      gov: *gov,
      snapshotReference: *snapshot_reference,
      minVotePower: *min_vote_power,
    }
    .abi_encode(),
  };

  encoded.into()
}

/// Builds `batchSetAllocator` call data against a deployed strategy.
pub fn batch_set_allocator_data(
  strategy: Address,
  entries: &[AllocatorEntry],
) -> TransactionData {
  let (allocators, flags): (Vec<_>, Vec<_>) =
    entries.iter().map(|e| (e.address, e.authorized)).unzip();

  TransactionData {
    to: strategy,
    data: MicroGrantsStrategy::batchSetAllocatorCall {
      _allocators: allocators,
      _flags: flags,
    }
    .abi_encode()
    .into(),
    value: U256::ZERO,
  }
}

/// Registration request of one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRecipient {
  pub registry_anchor: Address,
  pub recipient_address: Address,
  pub requested_amount: U256,
  pub metadata: MetadataPointer,
}

/// `(recipientId, status)` as decoded by the strategy's `_allocate`.
type AllocationPayload = (sol_data::Address, sol_data::Uint<8>);

/// Strategy calls that are routed through Allo for a specific pool.
///
/// This is a plain value: every builder takes the pool it targets from
/// here rather than from shared client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyHandle {
  pub allo: Address,
  pub pool_id: PoolId,
}

impl StrategyHandle {
  pub fn new(allo: Address, pool_id: PoolId) -> Self {
    Self { allo, pool_id }
  }

  pub fn register_recipient_data(
    &self,
    request: &RegisterRecipient,
  ) -> TransactionData {
    let payload = (
      request.registry_anchor,
      request.recipient_address,
      request.requested_amount,
      abi::Metadata {
        protocol: U256::from(IPFS_PROTOCOL),
        pointer: request.metadata.to_string(),
      },
    )
      .abi_encode_params();

    TransactionData {
      to: self.allo,
      data: IAllo::registerRecipientCall {
        _poolId: U256::from(self.pool_id.0),
        _data: payload.into(),
      }
      .abi_encode()
      .into(),
      value: U256::ZERO,
    }
  }

  pub fn allocation_data(
    &self,
    recipient: RecipientId,
    status: Status,
  ) -> TransactionData {
    let payload = <AllocationPayload as SolType>::abi_encode_params(&(
      recipient.0,
      u8::from(status),
    ));

    TransactionData {
      to: self.allo,
      data: IAllo::allocateCall {
        _poolId: U256::from(self.pool_id.0),
        _data: payload.into(),
      }
      .abi_encode()
      .into(),
      value: U256::ZERO,
    }
  }
}
