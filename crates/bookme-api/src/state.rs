//! Application state wiring services to their SQLite implementations.
//!
//! Services in bookme-core are generic over repository traits; AppState
//! pins them to the concrete infra implementations and shares them between
//! the CLI commands and the REST handlers.

use std::path::PathBuf;
use std::sync::Arc;

use bookme_core::service::booking::BookingService;
use bookme_core::service::profile::ProfileService;
use bookme_infra::config::{load_config, resolve_data_dir};
use bookme_infra::sqlite::booking::SqliteBookingRepository;
use bookme_infra::sqlite::pool::DatabasePool;
use bookme_infra::sqlite::profile::SqliteProfileRepository;
use bookme_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteProfileService = ProfileService<SqliteProfileRepository>;
pub type ConcreteBookingService =
    BookingService<SqliteBookingRepository, SqliteProfileRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<ConcreteProfileService>,
    pub booking_service: Arc<ConcreteBookingService>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join(&config.database_file).display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let profile_service =
            ProfileService::new(SqliteProfileRepository::new(db_pool.clone()));
        let booking_service = BookingService::new(
            SqliteBookingRepository::new(db_pool.clone()),
            SqliteProfileRepository::new(db_pool.clone()),
        );

        Ok(Self {
            profile_service: Arc::new(profile_service),
            booking_service: Arc::new(booking_service),
            config,
            data_dir,
            db_pool,
        })
    }
}
