mod api;
mod app;
mod breed;
mod config;
mod event;
mod store;
mod sync;
mod ui;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::api::BreedApi;
use crate::store::SqliteStore;
use crate::sync::SyncCoordinator;

#[derive(Parser, Debug)]
#[command(name = "catwalk")]
#[command(about = "A terminal browser for cat breeds")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/catwalk/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Path to the breed database (default: in the user data directory)
  #[arg(short, long)]
  db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // The terminal belongs to the TUI, so logs go to a file next to the
  // database. The guard must stay alive for the writer to flush.
  let _log_guard = init_logging()?;

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  let store = match args.db {
    Some(path) => SqliteStore::open(&path)?,
    None => SqliteStore::open_default()?,
  };
  let remote = BreedApi::new(&config)?;
  let coordinator = SyncCoordinator::new(store, remote, config.page_size);

  // Initialize and run the app
  let mut app = app::App::new(coordinator);
  app.run().await?;

  Ok(())
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
  let log_dir = SqliteStore::default_path()?
    .parent()
    .map(PathBuf::from)
    .ok_or_else(|| eyre!("Could not determine log directory"))?;
  std::fs::create_dir_all(&log_dir)
    .map_err(|e| eyre!("Failed to create log directory: {}", e))?;

  let appender = tracing_appender::rolling::never(&log_dir, "catwalk.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(guard)
}
