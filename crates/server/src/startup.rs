use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};
use service::{repository::Repository, storage::document_store::DocumentStore};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config from config.toml; fall back to env vars over the built-in
/// defaults (127.0.0.1:8080, db.json) when no file is present.
fn load_config() -> configs::AppConfig {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(_) => {
            let mut cfg = configs::AppConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                cfg.server.host = host;
            }
            if let Ok(port) = env::var("SERVER_PORT") {
                if let Ok(port) = port.parse::<u16>() {
                    cfg.server.port = port;
                }
            }
            if let Ok(path) = env::var("STORAGE_PATH") {
                cfg.storage.path = path;
            }
            cfg
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config();
    common::env::ensure_env(&cfg.storage.path).await?;

    // Backing document; created empty on first start
    let store = DocumentStore::new(&cfg.storage.path);
    store.ensure().await?;

    let state = ServerState {
        repo: Arc::new(Repository::new(store)),
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, document = %cfg.storage.path, "starting api server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
