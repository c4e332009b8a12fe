use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use forecast_api::{config::ApiConfig, construct_router};
use menu_forecast::{io::csv_source::load_raw_records, service::ForecastService};
use tracing_subscriber::EnvFilter;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "forecast.toml";

#[derive(Parser)]
#[command(version, about = "Menu sales forecast server")]
struct Cli {
    /// Path to the config file (forecast.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sales CSV to train on; overrides the config file and MENU_FORECAST_DATA
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:5000; overrides the config file and MENU_FORECAST_BIND
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,
}

fn load_config(cli: &Cli) -> Result<ApiConfig> {
    let mut cfg = match &cli.config {
        Some(path) => ApiConfig::from_path(path)?,
        None if std::path::Path::new(DEFAULT_CONFIG).exists() => ApiConfig::from_path(DEFAULT_CONFIG)?,
        None => ApiConfig::default(),
    };
    cfg.apply_env_overrides()?;
    if let Some(data) = &cli.data {
        cfg.forecast.source.path = data.clone();
    }
    if let Some(bind) = cli.bind {
        cfg.server.bind = bind;
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    // 1) Load and train; nothing is served until this succeeds
    let raw = load_raw_records(&cfg.forecast.source)?;
    let service = ForecastService::initialize(&raw, &cfg.forecast)
        .context("training failed; refusing to start")?;

    // 2) Serve
    let app = construct_router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind(cfg.server.bind)
        .await
        .with_context(|| format!("bind {}", cfg.server.bind))?;
    tracing::info!(addr = %cfg.server.bind, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
