use axum::{routing::get, Router};
use clap::Parser;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tb_store::TicketStore;

mod api;
mod error;
mod query;

// =============================================================================
// CLI
// =============================================================================

#[derive(Parser)]
#[command(name = "tb-hub", version, about = "Read-only ticket browser API")]
struct Args {
    /// Path to the ticket export (JSON)
    #[arg(long, default_value = "ticket_export.json")]
    data: PathBuf,

    /// Server bind address
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,

    /// Path to config file
    #[arg(long, default_value = "tb-hub.toml")]
    config: PathBuf,

    /// Directory of browser assets served for non-API paths (overrides config)
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

// =============================================================================
// Config
// =============================================================================

#[derive(Deserialize, Default, Clone, Debug)]
struct Config {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    query: QueryConfig,
}

#[derive(Deserialize, Clone, Debug)]
struct ServerConfig {
    #[serde(default = "default_static_dir")]
    static_dir: PathBuf,
    #[serde(default = "default_cors")]
    cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            cors: default_cors(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
struct QueryConfig {
    /// Page size when the request carries no usable `limit`.
    #[serde(default = "default_limit")]
    default_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}
fn default_cors() -> bool {
    true
}
fn default_limit() -> usize {
    query::DEFAULT_LIMIT
}

impl Config {
    /// A missing file means defaults. A malformed one is reported and ignored.
    fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read config {:?}: {}", path, e);
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
            Self::default()
        })
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Shared by every request. Nothing in here changes after startup.
struct AppState {
    store: TicketStore,
    config: Config,
    data_path: PathBuf,
    start_time: Instant,
}

// =============================================================================
// Router
// =============================================================================

fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/api/tickets", get(api::list_tickets))
        .route("/api/tickets/:id", get(api::get_ticket))
        .route("/api/stats", get(api::get_stats))
        .route("/api/status", get(api::get_status))
        // Browser assets
        .fallback_service(ServeDir::new(&state.config.server.static_dir))
        .with_state(state.clone());

    with_middleware(router, &state.config)
}

fn with_middleware(router: Router, config: &Config) -> Router {
    let router = router
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http());
    if config.server.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "tb_hub=info,tb_store=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config);
    if let Some(dir) = args.static_dir {
        config.server.static_dir = dir;
    }

    // The export is loaded once; without it there is nothing to serve.
    let store = match TicketStore::load(&args.data) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Error loading ticket data: {}", e);
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match args.bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address {:?}: {}", args.bind, e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        store,
        config,
        data_path: args.data.clone(),
        start_time: Instant::now(),
    });

    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    tracing::info!("  Ticket browser v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("  Browser:  http://{}", addr);
    tracing::info!("  API:      http://{}/api/tickets", addr);
    tracing::info!("  Data:     {:?}", args.data);
    tracing::info!("  Assets:   {:?}", state.config.server.static_dir);
    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.query.default_limit, 20);
        assert_eq!(config.server.static_dir, PathBuf::from("public"));
        assert!(config.server.cors);
    }

    #[test]
    fn test_config_partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str("[query]\ndefault_limit = 50\n").unwrap();
        assert_eq!(config.query.default_limit, 50);
        assert_eq!(config.server.static_dir, PathBuf::from("public"));

        let config: Config = toml::from_str("[server]\ncors = false\n").unwrap();
        assert!(!config.server.cors);
        assert_eq!(config.query.default_limit, 20);
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let config = Config::load(Path::new("/nonexistent/tb-hub.toml"));
        assert_eq!(config.query.default_limit, 20);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["tb-hub"]);
        assert_eq!(args.data, PathBuf::from("ticket_export.json"));
        assert_eq!(args.bind, "127.0.0.1:3000");
        assert!(args.static_dir.is_none());
    }
}
