//! reunite-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, builds the remote clients and serves the intake
//! API under `/api`.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use reunite_core::services::Enricher;
use reunite_pipeline::{Collaborators, IntakePipeline};
use reunite_remote::{
  CloudinaryUploader, HttpEnricher, HttpMatchScorer, StorageDownloader,
  TwilioSms,
};
use reunite_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Reunite intake and matching server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let settings = server_cfg.pipeline_settings();
  tokio::fs::create_dir_all(&settings.scratch_dir)
    .await
    .with_context(|| format!("failed to create scratch dir {:?}", settings.scratch_dir))?;

  let collaborators = collaborators(&server_cfg)?;
  if collaborators.enricher.is_none() {
    tracing::info!("no [enrichment] section; unidentified intakes skip enrichment");
  }
  let pipeline = Arc::new(IntakePipeline::new(Arc::new(store), collaborators, settings));

  let app = reunite_api::app(pipeline, server_cfg.cors);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Build the remote clients from their config sections.
fn collaborators(cfg: &ServerConfig) -> anyhow::Result<Collaborators> {
  let enricher: Option<Arc<dyn Enricher>> = match &cfg.enrichment {
    Some(endpoint) => Some(Arc::new(
      HttpEnricher::new(endpoint).context("failed to build enrichment client")?,
    )),
    None => None,
  };

  Ok(Collaborators {
    scorer: Arc::new(
      HttpMatchScorer::new(&cfg.scorer).context("failed to build scorer client")?,
    ),
    enricher,
    downloader: Arc::new(
      StorageDownloader::new(&cfg.gcs).context("failed to build storage client")?,
    ),
    uploader: Arc::new(
      CloudinaryUploader::new(&cfg.cloudinary).context("failed to build upload client")?,
    ),
    sms: Arc::new(TwilioSms::new(&cfg.twilio).context("failed to build sms client")?),
  })
}
