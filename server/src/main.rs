use anyhow::Result;
use axum::Router;
use clap::Parser;
use imgsearch_core::{Bm25Params, EngineConfig};
use imgsearch_server::{build_app, DEFAULT_PER_PAGE};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Path to the metadata JSON store
    #[arg(long, default_value = "./images/metadata.json")]
    corpus: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Images per listing page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    per_page: usize,
    /// BM25 term frequency saturation
    #[arg(long, default_value_t = 1.5)]
    k1: f64,
    /// BM25 length normalization
    #[arg(long, default_value_t = 0.75)]
    b: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = EngineConfig { bm25: Bm25Params { k1: args.k1, b: args.b } };
    let app: Router = build_app(&args.corpus, config, args.per_page)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
