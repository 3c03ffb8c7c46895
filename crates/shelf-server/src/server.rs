use shelf_store::{Catalog, JsonFileStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// Shelf web server.
#[derive(Debug)]
pub struct ShelfServer {
    config: ServerConfig,
    state: AppState,
}

impl ShelfServer {
    /// Open the configured library file and prepare the server.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let catalog = Catalog::open(JsonFileStore::new(&config.library_path));
        Self::with_catalog(config, catalog)
    }

    /// Serve an already-open catalog.
    pub fn with_catalog(config: ServerConfig, catalog: Catalog) -> ServerResult<Self> {
        Ok(Self {
            config,
            state: AppState::new(catalog)?,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            "Shelf server listening on http://{} (library: {})",
            self.config.bind_addr,
            self.config.library_path.display()
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| crate::error::ServerError::Internal(e.to_string()))
    }
}
