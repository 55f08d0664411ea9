// src/main.rs - detect the board, then serve the portal
use clap::Parser;
use piso_wifi::config::{self, DEFAULT_CONFIG_PATH};
use piso_wifi::web::{self, AppStateInner};
use std::path::PathBuf;
use std::sync::Arc;

/// Coin-operated WiFi terminal
#[derive(Parser, Debug)]
#[command(name = "piso-wifi", version, about = "Captive portal and relay control for coin-operated WiFi terminals.")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config and PISO_HTTP_ADDR)
    #[arg(long)]
    addr: Option<String>,

    /// Board compatible string, skipping device-tree probing (overrides PISO_BOARD_COMPATIBLE)
    #[arg(long)]
    board: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .init();

    tracing::info!("Starting piso-wifi {}", env!("CARGO_PKG_VERSION"));

    let explicit = cli.config.is_some();
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = config::load_or_default(&config_path, explicit).map_err(|e| {
        tracing::error!("Failed to load config from '{}': {}", config_path.display(), e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })?;
    config.apply_env();
    config.apply_cli(cli.addr, cli.board);
    config.validate()?;

    let detector = config.board_detector();
    let board = detector.detect().map_err(|e| {
        tracing::error!(
            "Board detection failed on {} ({}): {}",
            detector.arch(),
            detector.compatible_path().display(),
            e
        );
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })?;

    tracing::info!("Detected board: {} ({})", board.name, board.id);
    if board.has_gpio {
        tracing::info!(
            "Pins: coin {} ({:?}), relay {} (active {}), bill {} ({:?})",
            board.pins.coin_pin,
            board.pins.coin_edge,
            board.pins.relay_pin,
            board.pins.relay_active,
            board.pins.bill_pin,
            board.pins.bill_edge
        );
    } else {
        tracing::warn!("GPIO not available on this platform, running in simulation mode");
    }

    let gpio = Arc::new(config.gpio());
    if board.has_gpio {
        tracing::info!("Driving GPIO through {}", gpio.root().display());
    }
    let state = Arc::new(AppStateInner::from_config(&config, board, gpio));
    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()?).await?;
    tracing::info!("Portal listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
