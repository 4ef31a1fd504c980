use invoice_desk::config::Config;
use invoice_desk::db;
use invoice_desk::service::{DeskActions, ImageStore, render_cache};
use invoice_desk::views::Views;
use invoice_desk::{DeskState, desk_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        public_dir = %cfg.basic.public_dir.display(),
        loglevel = %cfg.basic.loglevel,
        body_limit = cfg.basic.body_limit
    );

    let storage = db::connect(&cfg.basic.database_url).await?;
    let images = ImageStore::new(cfg.image_dir());
    let cache = render_cache::spawn().await?;
    let actions = DeskActions::new(storage, images, cache);

    let state = DeskState::new(actions, Views::new()?, cfg.basic.body_limit);
    let app = desk_router(state);

    let addr = cfg.basic.listen_addr.as_str();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
