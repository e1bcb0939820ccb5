use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use clarity_drills::{AppState, Config, Corpus, FileBackend, HttpCoachClient, Store};

#[derive(Parser)]
#[command(name = "clarity-drills", about = "Voice-first communication practice service")]
struct Args {
    /// Config file path, without extension
    #[arg(long, default_value = "config/clarity-drills")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Clarity Drills v0.1.0");
    info!("Loaded config: {}", cfg.service.name);

    let store = Arc::new(Store::new(Box::new(FileBackend::new(
        &cfg.storage.data_dir,
    )?)));
    store.migrate_profile()?;

    let coach = Arc::new(HttpCoachClient::new(cfg.coach.clone()));
    let corpus = Arc::new(Corpus::builtin());
    let state = AppState::new(store, corpus, coach);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, clarity_drills::create_router(state)).await?;

    Ok(())
}
