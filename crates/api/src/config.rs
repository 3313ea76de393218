//! Process configuration for the API binary.

use std::path::PathBuf;

use thiserror::Error;

use payroll_core::DomainError;
use payroll_infra::ExecutorConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

const ENV_BIND_ADDR: &str = "PAYROLL_BIND_ADDR";
const ENV_SEED_PATH: &str = "PAYROLL_SEED_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid executor configuration: {0}")]
    Executor(#[from] DomainError),

    #[error("failed to read seed file {path}: {source}")]
    SeedIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed seed file {path}: {source}")]
    SeedFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid seed data: {0}")]
    SeedData(String),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    /// JSON file with departments and employees loaded at startup.
    pub seed_path: Option<PathBuf>,
    pub executor: ExecutorConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            seed_path: None,
            executor: ExecutorConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| {
            tracing::debug!("{ENV_BIND_ADDR} not set; using {DEFAULT_BIND_ADDR}");
            DEFAULT_BIND_ADDR.to_string()
        });
        let seed_path = std::env::var_os(ENV_SEED_PATH).map(PathBuf::from);

        Ok(Self {
            bind_addr,
            seed_path,
            executor: ExecutorConfig::from_env()?,
        })
    }
}
