use sqlx::SqlitePool;
use vocab_srs::SchedulerConfig;

use crate::{ApiConfig, config::Environment, review::locks::CardLocks};

#[derive(Clone, Debug)]
pub struct ApiState {
    pub pool: SqlitePool,
    pub scheduler: SchedulerConfig,
    pub environment: Environment,
    pub card_locks: CardLocks,
}

impl ApiState {
    /// Open the database described by `config`, migrate it, and build the state.
    pub async fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let pool = vocab_db::create_pool(&config.database_url, config.db_max_connections).await?;
        vocab_db::migrate(&pool).await?;

        tracing::info!(
            database_url = %config.database_url,
            max_connections = config.db_max_connections,
            "Database ready"
        );

        Ok(Self::from_pool(pool, config.scheduler, config.env))
    }

    /// Build the state around an already migrated pool.
    pub fn from_pool(pool: SqlitePool, scheduler: SchedulerConfig, environment: Environment) -> Self {
        Self {
            pool,
            scheduler,
            environment,
            card_locks: CardLocks::default(),
        }
    }
}
