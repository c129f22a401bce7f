use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use route_server::cache::CacheConfig;
use route_server::planner::SearchConfig;
use route_server::store::Store;
use route_server::web::{AppState, create_router};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Settings read from the environment at startup.
struct Settings {
    addr: SocketAddr,
    seed: Option<PathBuf>,
    cache_ttl: Option<Duration>,
}

impl Settings {
    fn from_env() -> Result<Self, Box<dyn Error>> {
        let addr = std::env::var("ROUTES_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|e| format!("invalid ROUTES_ADDR: {e}"))?;

        let seed = std::env::var_os("ROUTES_SEED").map(PathBuf::from);

        let cache_ttl = match std::env::var("ROUTES_CACHE_TTL_SECS") {
            Ok(secs) => Some(Duration::from_secs(
                secs.parse()
                    .map_err(|e| format!("invalid ROUTES_CACHE_TTL_SECS: {e}"))?,
            )),
            Err(_) => None,
        };

        Ok(Self {
            addr,
            seed,
            cache_ttl,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env()?;

    let store = Store::new();
    match &settings.seed {
        Some(path) => {
            store.load_seed(path).await?;
        }
        None => warn!("ROUTES_SEED not set, starting with an empty store"),
    }

    let mut cache_config = CacheConfig::default();
    if let Some(ttl) = settings.cache_ttl {
        cache_config = cache_config.with_ttl(ttl);
    }

    let state = AppState::new(store, &cache_config, SearchConfig::default());
    let app = create_router(state);

    info!(addr = %settings.addr, "route finder listening");
    info!("  GET  /health");
    info!("  GET  /api/v1/routes?fromLocationId=&toLocationId=");
    info!("  GET|POST /api/v1/locations, GET /api/v1/locations/search?query=");
    info!("  GET|POST /api/v1/transportations");

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
