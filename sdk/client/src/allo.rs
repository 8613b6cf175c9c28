use {
  crate::{
    abi::{self, IAllo},
    ChainClient,
    Error,
  },
  alloy_primitives::{address, Address, Bytes, U256},
  alloy_sol_types::SolCall,
  grants_primitives::{
    MetadataPointer,
    PoolId,
    ProfileId,
    TransactionData,
    IPFS_PROTOCOL,
  },
};

/// Allo v2 proxy, deployed at the same address on every supported network.
pub const ALLO_ADDRESS: Address =
  address!("1133eA7Af70876e64665ecD07C0A0476d09465a1");

/// Sentinel token address Allo uses for the network's native currency.
pub const NATIVE: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Arguments of `createPoolWithCustomStrategy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePoolArgs {
  /// Sender must be a member of this profile.
  pub profile_id: ProfileId,
  pub strategy: Address,
  pub init_strategy_data: Bytes,
  pub token: Address,
  pub amount: U256,
  pub metadata: MetadataPointer,
  pub managers: Vec<Address>,
}

/// Call data builders and read calls against the Allo pool registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allo {
  address: Address,
}

impl Allo {
  pub fn new(address: Address) -> Self {
    Self { address }
  }

  pub fn address(&self) -> Address {
    self.address
  }

  /// Pools funded in the native currency have to carry the funding
  /// amount as transaction value, ERC20 pools pull it by allowance.
  pub fn create_pool_with_custom_strategy(
    &self,
    args: &CreatePoolArgs,
  ) -> TransactionData {
    let value = if args.token == NATIVE {
      args.amount
    } else {
      U256::ZERO
    };

    TransactionData {
      to: self.address,
      data: IAllo::createPoolWithCustomStrategyCall {
        _profileId: args.profile_id.0,
        _strategy: args.strategy,
        _initStrategyData: args.init_strategy_data.clone(),
        _token: args.token,
        _amount: args.amount,
        _metadata: abi::Metadata {
          protocol: U256::from(IPFS_PROTOCOL),
          pointer: args.metadata.to_string(),
        },
        _managers: args.managers.clone(),
      }
      .abi_encode()
      .into(),
      value,
    }
  }

  /// Looks up the strategy contract bound to a pool. Allo answers with
  /// the zero address for pools it does not know.
  pub async fn get_strategy(
    &self,
    chain: &dyn ChainClient,
    pool_id: PoolId,
  ) -> Result<Address, Error> {
    let call = IAllo::getStrategyCall {
      _poolId: U256::from(pool_id.0),
    };
    let output = chain.call(self.address, call.abi_encode().into()).await?;
    let decoded = IAllo::getStrategyCall::abi_decode_returns(&output, true)?;
    if decoded._0 == Address::ZERO {
      return Err(Error::UnknownPool(pool_id));
    }
    Ok(decoded._0)
  }
}
