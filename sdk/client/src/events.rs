use {
  crate::abi::MicroGrantsStrategy::{
    AllocatorSet,
    Initialized,
    Registered,
    UpdatedRegistration,
  },
  alloy_sol_types::SolEvent,
  grants_primitives::Log,
  tracing::debug,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
  Initialized,
  Registered,
  UpdatedRegistration,
  AllocatorSet,
}

impl EventKind {
  pub fn name(&self) -> &'static str {
    match self {
      EventKind::Initialized => "Initialized",
      EventKind::Registered => "Registered",
      EventKind::UpdatedRegistration => "UpdatedRegistration",
      EventKind::AllocatorSet => "AllocatorSet",
    }
  }
}

/// A log emitted by a MicroGrants strategy, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyEvent {
  Initialized(Initialized),
  Registered(Registered),
  UpdatedRegistration(UpdatedRegistration),
  AllocatorSet(AllocatorSet),
}

impl StrategyEvent {
  pub fn kind(&self) -> EventKind {
    match self {
      StrategyEvent::Initialized(_) => EventKind::Initialized,
      StrategyEvent::Registered(_) => EventKind::Registered,
      StrategyEvent::UpdatedRegistration(_) => EventKind::UpdatedRegistration,
      StrategyEvent::AllocatorSet(_) => EventKind::AllocatorSet,
    }
  }

  fn decode(log: &Log) -> Option<Self> {
    let topic0 = log.topics.first()?;
    let topics = log.topics.iter().copied();
    let decoded = if *topic0 == Initialized::SIGNATURE_HASH {
      Initialized::decode_raw_log(topics, &log.data, true)
        .map(StrategyEvent::Initialized)
    } else if *topic0 == Registered::SIGNATURE_HASH {
      Registered::decode_raw_log(topics, &log.data, true)
        .map(StrategyEvent::Registered)
    } else if *topic0 == UpdatedRegistration::SIGNATURE_HASH {
      UpdatedRegistration::decode_raw_log(topics, &log.data, true)
        .map(StrategyEvent::UpdatedRegistration)
    } else if *topic0 == AllocatorSet::SIGNATURE_HASH {
      AllocatorSet::decode_raw_log(topics, &log.data, true)
        .map(StrategyEvent::AllocatorSet)
    } else {
      return None;
    };

    match decoded {
      Ok(event) => Some(event),
      Err(e) => {
        debug!("skipping malformed {topic0} log from {}: {e}", log.address);
        None
      }
    }
  }
}

/// Decodes all logs of a receipt against the strategy event set.
///
/// A receipt also carries logs of Allo and of token contracts; anything
/// that is not a strategy event is skipped.
pub fn decode_logs(logs: &[Log]) -> Vec<StrategyEvent> {
  logs.iter().filter_map(StrategyEvent::decode).collect()
}

/// First decoded event of the given kind, in log order.
pub fn extract_first(
  events: &[StrategyEvent],
  kind: EventKind,
) -> Option<&StrategyEvent> {
  events.iter().find(|e| e.kind() == kind)
}
