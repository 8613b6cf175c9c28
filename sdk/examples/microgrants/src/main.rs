use {
  crate::settings::SystemSettings,
  clap::Parser,
  grants_client_sdk::GrantFlowOrchestrator,
  std::sync::Arc,
  tracing::info,
  tracing_subscriber::EnvFilter,
};

mod flow;
mod settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // configure logging, RUST_LOG overrides the default level
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .init();

  // gather CLI parameters
  let settings = SystemSettings::parse();
  info!("startup settings: {settings:#?}");

  let http = reqwest::Client::new();
  let indexer = Arc::new(settings.indexer(http.clone()));
  let orchestrator = GrantFlowOrchestrator::new(
    settings.orchestrator_config()?,
    Arc::new(settings.chain_client(http.clone())),
    Arc::new(settings.pinning_client(http)),
    indexer.clone(),
    indexer,
  );

  flow::run(&orchestrator, &settings).await
}
