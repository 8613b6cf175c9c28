use {
  crate::{ChainId, Error, MetadataPointer, PoolId, ProfileId},
  alloy_primitives::{Address, U256},
  serde::{Deserialize, Serialize},
  std::{fmt::Display, str::FromStr},
};

/// Flavours of the MicroGrants strategy.
///
/// The name is what the strategy reports on chain and what the indexer
/// uses to decide whether a pool is tracked. Deploying one flavour and
/// expecting the indexer to track it as another leaves the pool unindexed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyType {
  MicroGrants,
  Hats,
  Gov,
}

impl StrategyType {
  pub fn name(&self) -> &'static str {
    match self {
      StrategyType::MicroGrants => "MicroGrantsv1",
      StrategyType::Hats => "MicroGrantsHatsv1",
      StrategyType::Gov => "MicroGrantsGovv1",
    }
  }
}

impl Display for StrategyType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl FromStr for StrategyType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "microgrants" | "micrograntsv1" => Ok(StrategyType::MicroGrants),
      "hats" | "micrograntshatsv1" => Ok(StrategyType::Hats),
      "gov" | "micrograntsgovv1" => Ok(StrategyType::Gov),
      _ => Err(Error::UnknownStrategyType(s.to_owned())),
    }
  }
}

/// A deployed strategy contract and the network it lives on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyInstance {
  pub address: Address,
  pub chain: ChainId,
  pub kind: StrategyType,
}

/// A funding pool as created by this client. Pools are never updated
/// after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
  pub id: PoolId,
  pub owner: ProfileId,
  pub strategy: StrategyInstance,
  pub amount: U256,
  pub token: Address,
  pub metadata: MetadataPointer,
}
