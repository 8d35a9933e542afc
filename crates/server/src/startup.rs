use std::{env, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use service::{runtime, TodoStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve bind address and snapshot path. A readable config.toml must pass
/// `normalize_and_validate` (a zero port is a startup error, not a silent
/// ephemeral bind); env vars cover the no-config case.
fn load_runtime_config() -> anyhow::Result<(SocketAddr, String)> {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.normalize_and_validate()?;
            let addr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
            Ok((addr, cfg.storage.snapshot_path))
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            let snapshot = env::var("TODO_SNAPSHOT_PATH")
                .unwrap_or_else(|_| "data/todos.json".to_string());
            Ok((format!("{}:{}", host, port).parse()?, snapshot))
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let (addr, snapshot_path) = load_runtime_config()?;
    if let Some(parent) = Path::new(&snapshot_path).parent() {
        if !parent.as_os_str().is_empty() {
            runtime::ensure_env(&parent.to_string_lossy()).await?;
        }
    }

    // Single shared store; the store's lock is the concurrency boundary
    // for every request handler.
    let store = TodoStore::open(&snapshot_path).await?;

    let cors = build_cors();
    let app: Router = routes::build_router(Arc::clone(&store), cors);

    info!(%addr, snapshot = %snapshot_path, "starting todo server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test because CONFIG_PATH is process-global state.
    #[test]
    fn zero_port_config_is_a_startup_error() {
        let dir = std::env::temp_dir().join(format!("todo_cfg_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let cfg_path = dir.join("config.toml");
        std::fs::write(
            &cfg_path,
            "[server]\nhost = \"127.0.0.1\"\nport = 0\n",
        )
        .unwrap();

        std::env::remove_var("SERVER_HOST");
        std::env::remove_var("SERVER_PORT");
        std::env::remove_var("TODO_SNAPSHOT_PATH");
        std::env::set_var("CONFIG_PATH", &cfg_path);
        let res = load_runtime_config();
        assert!(res.is_err(), "port 0 must not fall back to an ephemeral bind");

        // missing config file falls back to env defaults
        std::env::set_var("CONFIG_PATH", dir.join("nonexistent.toml"));
        let (addr, snapshot) = load_runtime_config().unwrap();
        assert_eq!(addr.port(), 8080);
        assert_eq!(snapshot, "data/todos.json");

        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
