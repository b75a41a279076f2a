//! App Context

use std::sync::Arc;

use serde::Serialize;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::{AuthService, UsersAuthService},
    database::{self, Db},
    domain::{
        orders::{MemoryOrdersService, OrdersService, PgOrdersService},
        products::{MemoryProductsService, PgProductsService, ProductsService},
        users::{MemoryUsersService, PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),
}

/// State of the database connection as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Which backend the app is running on and whether it is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub is_available: bool,
    pub is_connected: bool,
    pub connection_state: ConnectionState,
    pub using_fallback: bool,
    pub message: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    db: Option<Db>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str, admin_key: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let db = Db::new(pool);
        let users: Arc<dyn UsersService> = Arc::new(PgUsersService::new(db.clone()));

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            auth: Arc::new(UsersAuthService::new(Arc::clone(&users), admin_key)),
            users,
            db: Some(db),
        })
    }

    /// In-memory context seeded with the starter catalog.
    #[must_use]
    pub fn in_memory(admin_key: &str) -> Self {
        let users: Arc<dyn UsersService> = Arc::new(MemoryUsersService::new());

        Self {
            products: Arc::new(MemoryProductsService::seeded()),
            orders: Arc::new(MemoryOrdersService::new()),
            auth: Arc::new(UsersAuthService::new(Arc::clone(&users), admin_key)),
            users,
            db: None,
        }
    }

    /// Context over caller-supplied services, reported as the in-memory backend.
    #[must_use]
    pub fn from_services(
        products: Arc<dyn ProductsService>,
        orders: Arc<dyn OrdersService>,
        users: Arc<dyn UsersService>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            products,
            orders,
            users,
            auth,
            db: None,
        }
    }

    /// Uses `PostgreSQL` when `url` is given and reachable, otherwise the in-memory backend.
    pub async fn connect(url: Option<&str>, admin_key: &str) -> Self {
        let Some(url) = url.filter(|url| !url.trim().is_empty()) else {
            info!("no database configured, using in-memory storage");
            return Self::in_memory(admin_key);
        };

        match Self::from_database_url(url, admin_key).await {
            Ok(context) => {
                info!("connected to database");
                context
            }
            Err(error) => {
                warn!(error = %error, "database unavailable, falling back to in-memory storage");
                Self::in_memory(admin_key)
            }
        }
    }

    /// Whether the in-memory backend is in use.
    #[must_use]
    pub fn using_fallback(&self) -> bool {
        self.db.is_none()
    }

    /// Reports the active backend, pinging the database when there is one.
    pub async fn database_status(&self) -> DatabaseStatus {
        let Some(db) = &self.db else {
            return DatabaseStatus {
                is_available: false,
                is_connected: false,
                connection_state: ConnectionState::Disconnected,
                using_fallback: true,
                message: "Using in-memory storage as fallback".to_string(),
            };
        };

        match db.ping().await {
            Ok(()) => DatabaseStatus {
                is_available: true,
                is_connected: true,
                connection_state: ConnectionState::Connected,
                using_fallback: false,
                message: "Connected to PostgreSQL".to_string(),
            },
            Err(error) => {
                warn!(error = %error, "database ping failed");

                DatabaseStatus {
                    is_available: true,
                    is_connected: false,
                    connection_state: ConnectionState::Disconnected,
                    using_fallback: false,
                    message: "Database is available but not connected".to_string(),
                }
            }
        }
    }
}
