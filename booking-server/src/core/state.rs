//! Server state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtService, SessionHub};
use crate::booking::BookingService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared server state - cheap to clone, all heavy members are behind Arc
/// or are pools.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt: Arc<JwtService>,
    pub session: Arc<SessionHub>,
    pub bookings: BookingService,
}

impl ServerState {
    /// Open the database, run migrations and wire the services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// Build state over an existing database (tests use an in-memory pool)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
        let session = Arc::new(SessionHub::new());
        let bookings = BookingService::new(db.pool.clone());

        Self {
            config,
            db,
            jwt,
            session,
            bookings,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
