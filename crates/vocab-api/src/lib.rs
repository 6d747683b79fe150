pub mod card;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod normalization;
pub mod review;
pub mod router;
pub mod state;
pub mod stats;
pub mod tracing;

pub use config::ApiConfig;
pub use state::ApiState;
