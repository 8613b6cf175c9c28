use {
  crate::settings::{Command, SystemSettings},
  anyhow::Context,
  grants_client_sdk::{ApplicationReceipt, GrantFlowOrchestrator},
  grants_primitives::{
    AllocatorEntry,
    Decision,
    MetadataPointer,
    NewApplication,
    Pool,
    PoolMetadata,
    ProfileId,
  },
  std::path::Path,
  tracing::{info, warn},
};

pub async fn run(
  flow: &GrantFlowOrchestrator,
  settings: &SystemSettings,
) -> anyhow::Result<()> {
  match settings.command() {
    Command::Deploy {
      profile_id,
      metadata,
      name,
      description,
    } => {
      let metadata = match metadata {
        Some(pointer) => pointer.clone(),
        None => {
          flow
            .pin_pool_metadata(&PoolMetadata {
              name: name.clone(),
              description: description.clone(),
            })
            .await?
        }
      };
      let pool = deploy(flow, *profile_id, &metadata).await?;
      println!("{}", serde_json::to_string_pretty(&pool)?);
    }

    Command::SetAllocators {
      pool_id,
      authorize,
      revoke,
    } => {
      let entries: Vec<_> = authorize
        .iter()
        .copied()
        .map(AllocatorEntry::authorize)
        .chain(revoke.iter().copied().map(AllocatorEntry::revoke))
        .collect();
      flow.set_allocators(*pool_id, &entries).await?;
    }

    Command::Apply {
      pool_id,
      application,
    } => {
      let application = load_application(application)?;
      match flow
        .submit_application(&application, settings.chain_id(), *pool_id)
        .await?
      {
        Some(receipt) => report(&receipt)?,
        None => warn!("chain {} does not accept applications", settings.chain_id()),
      }
    }

    Command::Allocate {
      pool_id,
      recipient,
      decision,
    } => flow.allocate(*pool_id, *recipient, *decision).await?,

    Command::Demo {
      profile_id,
      application,
    } => {
      let application = load_application(application)?;
      demo(flow, settings, *profile_id, &application).await?;
    }
  }

  Ok(())
}

/// Pool creation followed by a bounded wait for the indexer. A pool the
/// indexer never picks up is still usable on chain.
async fn deploy(
  flow: &GrantFlowOrchestrator,
  profile_id: ProfileId,
  metadata: &MetadataPointer,
) -> anyhow::Result<Pool> {
  let pool = flow.deploy_strategy(profile_id, metadata).await?;
  match flow.await_pool_indexed(&pool).await {
    Ok(attempts) => info!("{:?} indexed after {attempts} poll(s)", pool.id),
    Err(e) => warn!("{:?} not indexed yet: {e}", pool.id),
  }
  Ok(pool)
}

async fn demo(
  flow: &GrantFlowOrchestrator,
  settings: &SystemSettings,
  profile_id: ProfileId,
  application: &NewApplication,
) -> anyhow::Result<()> {
  let metadata = flow
    .pin_pool_metadata(&PoolMetadata {
      name: format!("{} grants", application.name),
      description: application.description.clone(),
    })
    .await?;

  let pool = deploy(flow, profile_id, &metadata).await?;
  println!("{}", serde_json::to_string_pretty(&pool)?);

  flow
    .set_allocators(pool.id, &[AllocatorEntry::authorize(settings.sender())])
    .await?;

  let receipt = flow
    .submit_application(application, settings.chain_id(), pool.id)
    .await?
    .with_context(|| {
      format!("chain {} does not accept applications", settings.chain_id())
    })?;
  report(&receipt)?;

  flow
    .allocate(pool.id, receipt.recipient.id, Decision::Approve)
    .await?;
  info!("demo flow completed on {:?}", pool.id);
  Ok(())
}

fn load_application(path: &Path) -> anyhow::Result<NewApplication> {
  let json = std::fs::read_to_string(path)
    .with_context(|| format!("reading {}", path.display()))?;
  serde_json::from_str(&json)
    .with_context(|| format!("parsing application {}", path.display()))
}

fn report(receipt: &ApplicationReceipt) -> anyhow::Result<()> {
  if !receipt.indexed {
    warn!("recipient {} is not indexed yet", receipt.recipient.id);
  }
  if !receipt.metadata_available {
    warn!("metadata {} is not retrievable yet", receipt.recipient.metadata);
  }
  println!("{}", serde_json::to_string_pretty(&receipt.recipient)?);
  Ok(())
}
