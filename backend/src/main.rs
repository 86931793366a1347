use std::env;

use todomaster_backend::{config::Config, create_app, Storage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,todomaster_backend=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let storage = if config.uses_memory_store() {
        tracing::warn!("using in-memory storage; data is lost on restart");
        Storage::memory()
    } else {
        tracing::info!(redis_url = %config.redis_url, "using redis storage");
        Storage::redis(&config.redis_url)?
    };

    let app = create_app(storage, Some(&config.static_dir));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, static_dir = %config.static_dir, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
