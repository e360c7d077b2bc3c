//! Harvestcast Prediction Server
//!
//! HTTP API server that loads the trained harvest model once at startup
//! and serves harvest date predictions for crop parameters and field
//! images.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use harvestcast_server::state::{AppState, ServerConfig};

/// Harvestcast Prediction Server
#[derive(Parser, Debug)]
#[command(name = "harvestcast-server")]
#[command(version = "0.1.0")]
#[command(about = "HTTP prediction service for the harvestcast model")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory containing the trained model artifact
    #[arg(long, env = "HARVESTCAST_MODEL_DIR", default_value = "models")]
    model_dir: PathBuf,

    /// Directory where uploaded images are stored
    #[arg(long, env = "HARVESTCAST_UPLOADS_DIR", default_value = "uploads")]
    uploads_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("Harvestcast Prediction Server v{}", env!("CARGO_PKG_VERSION"));
    info!("  Model dir:   {:?}", cli.model_dir);
    info!("  Uploads dir: {:?}", cli.uploads_dir);

    let config = ServerConfig {
        model_dir: cli.model_dir,
        uploads_dir: cli.uploads_dir,
    };

    // Fail fast when the model artifact is absent
    let state = Arc::new(AppState::initialize(config.clone())?);
    info!("Model loaded, input size {}px", state.predictor.image_size());

    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let app = harvestcast_server::app(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
