//! etcdview console server.
//!
//! Serves the admin console's HTTP API over a store configured through the
//! `ETCD_*` environment (endpoints, optional TLS material, optional
//! username/password).
//!
//! Usage:
//!   etcdview-server --port 8080

use anyhow::Result;
use clap::Parser;
use etcdview_gateway::{EtcdGateway, GatewayConfig, StoreGateway, config::parse_endpoints};
use etcdview_server::{AppState, build_router};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "etcdview-server")]
#[command(about = "HTTP proxy for the etcdview admin console")]
struct Args {
    /// Port to serve the HTTP API on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Store endpoints, comma-separated (overrides ETCD_ENDPOINTS)
    #[arg(long)]
    endpoints: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let mut config = GatewayConfig::from_env();
    if let Some(endpoints) = &args.endpoints {
        config.endpoints = parse_endpoints(endpoints);
    }
    let endpoint = config.primary_endpoint().to_string();
    info!("etcdview server starting, store at {endpoint}");

    let gateway: Arc<dyn StoreGateway> = Arc::new(EtcdGateway::new(config));
    let state = Arc::new(AppState::new(gateway, endpoint));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;
    info!("HTTP API listening on port {}", args.port);
    axum::serve(listener, app).await?;
    Ok(())
}
