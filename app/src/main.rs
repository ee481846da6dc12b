//! `conduit`: a terminal front end for the Conduit client
//!
//! Reads commands from stdin and prints each resulting page as text. Logs go
//! to stderr; set `RUST_LOG` to change the filter.

use anyhow::{Context, Result};
use clap::Parser;
use conduit_api::HttpClient;
use conduit_app::platform::FileStorage;
use conduit_app::shell::Shell;
use conduit_app::{AppAction, AppConfig, app_store};
use conduit_core::environment::MemoryLocation;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Conduit client shell
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the REST API (overrides `CONDUIT_API_URL`)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory holding the persisted session
    #[arg(long, env = "CONDUIT_DATA_DIR", default_value = ".conduit")]
    data_dir: PathBuf,

    /// Articles per list page (overrides `CONDUIT_PAGE_SIZE`)
    #[arg(long)]
    page_size: Option<u64>,

    /// Location to open at start-up
    #[arg(long, default_value = "/")]
    location: String,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conduit=info,conduit_app=info,conduit_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    if let Some(page_size) = cli.page_size {
        config = config.with_page_size(page_size);
    }
    tracing::info!(api_url = %config.api_url, page_size = config.page_size, "Starting");

    let storage = FileStorage::open(&cli.data_dir)
        .with_context(|| format!("opening storage in {}", cli.data_dir.display()))?;
    let api = HttpClient::new(config.api_url.clone());
    let location = Arc::new(MemoryLocation::new(cli.location));

    let store = app_store(api, Arc::new(storage), location, config);
    let shell = Shell::new(store);

    shell.dispatch(AppAction::Start).await?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    shell.run(stdin, tokio::io::stdout()).await?;

    shell.store().shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
