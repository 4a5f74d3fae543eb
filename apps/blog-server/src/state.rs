//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::BlogService;
use inkwell_infra::{DatabaseConfig, DatabaseConnections, InMemoryStore};

#[cfg(feature = "postgres")]
use inkwell_infra::{
    PostgresPageRepository, PostgresPostRepository, PostgresSiteSetupRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(connections);
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            "Failed to connect to database. Using in-memory fallback."
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(Arc::new(InMemoryStore::new()))
    }

    /// State backed by a single in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        let blog = BlogService::new(store.clone(), store.clone(), store.clone(), store);
        Self { blog, db: None }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: DatabaseConnections) -> Self {
        let db = &connections.main;
        let blog = BlogService::new(
            Arc::new(PostgresPostRepository::new(Arc::clone(db))),
            Arc::new(PostgresPageRepository::new(Arc::clone(db))),
            Arc::new(PostgresUserRepository::new(Arc::clone(db))),
            Arc::new(PostgresSiteSetupRepository::new(Arc::clone(db))),
        );

        Self {
            blog,
            db: Some(Arc::new(connections)),
        }
    }
}
