//! Solidity bindings for the parts of Allo v2 and the MicroGrants
//! strategies this client touches.

use alloy_sol_types::sol;

sol! {
  /// Off-chain metadata reference as stored by Allo.
  #[derive(Debug, PartialEq, Eq)]
  struct Metadata {
    uint256 protocol;
    string pointer;
  }

  /// Initialization payload shared by all MicroGrants strategies.
  #[derive(Debug, PartialEq, Eq)]
  struct InitializeParams {
    bool useRegistryAnchor;
    uint64 allocationStartTime;
    uint64 allocationEndTime;
    uint256 approvalThreshold;
    uint256 maxRequestedAmount;
  }

  /// Hats flavour: allocators are wearers of a given hat.
  #[derive(Debug, PartialEq, Eq)]
  struct InitializeParamsHats {
    InitializeParams params;
    address hats;
    uint256 hatId;
  }

  /// Governance flavour: allocators are holders of voting power.
  #[derive(Debug, PartialEq, Eq)]
  struct InitializeParamsGov {
    InitializeParams params;
    address gov;
    uint256 snapshotReference;
    uint256 minVotePower;
  }

  interface IAllo {
    function createPoolWithCustomStrategy(
      bytes32 _profileId,
      address _strategy,
      bytes _initStrategyData,
      address _token,
      uint256 _amount,
      Metadata _metadata,
      address[] _managers
    ) external payable returns (uint256 poolId);

    function registerRecipient(uint256 _poolId, bytes _data)
      external payable returns (address recipientId);

    function allocate(uint256 _poolId, bytes _data) external payable;

    function getStrategy(uint256 _poolId) external view returns (address);
  }

  contract MicroGrantsStrategy {
    constructor(address _allo, string _name);

    function batchSetAllocator(address[] _allocators, bool[] _flags) external;

    #[derive(Debug, PartialEq, Eq)]
    event Initialized(uint256 poolId, bytes data);

    #[derive(Debug, PartialEq, Eq)]
    event Registered(address indexed recipientId, bytes data, address sender);

    #[derive(Debug, PartialEq, Eq)]
    event UpdatedRegistration(
      address indexed recipientId,
      bytes data,
      address sender,
      uint8 status
    );

    #[derive(Debug, PartialEq, Eq)]
    event AllocatorSet(address indexed allocator, bool indexed _flag);
  }
}
