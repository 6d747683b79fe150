use anyhow::Context;
use serde::Deserialize;
use vocab_srs::SchedulerConfig;

/// Deployment environment, selects log format and defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Service configuration, read from environment variables.
///
/// Every field has a default so a bare `serv` starts against a local
/// `vocab.db`. Scheduler parameters are read from `SRS_`-prefixed variables
/// (for example `SRS_MATURITY_THRESHOLD_DAYS=30`).
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub env: Environment,
    /// Comma-separated list. Empty means any origin is allowed.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
    #[serde(skip)]
    pub scheduler: SchedulerConfig,
}

fn default_database_url() -> String {
    "sqlite://vocab.db".to_string()
}

const fn default_db_max_connections() -> u32 {
    5
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_metrics_enabled() -> bool {
    true
}

impl ApiConfig {
    /// Load from the process environment (call `dotenvy::dotenv()` first to pick up `.env`).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Load from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let mut config: Self = envy::from_iter(vars.iter().cloned())
            .context("failed to read service configuration")?;
        config.scheduler = envy::prefixed("SRS_")
            .from_iter(vars)
            .context("failed to read SRS_ scheduler configuration")?;
        config.scheduler.validate()?;

        config.allowed_origins = config
            .allowed_origins
            .into_iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
