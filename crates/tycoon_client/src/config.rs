use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tycoon_control::StrategyParams;

use crate::api::Credentials;

/// Value left in shipped config templates for fields the operator must fill.
const PLACEHOLDER: &str = "?";

fn default_error_backoff_ms() -> u64 {
    1000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_error_backoff_ms")]
    pub error_backoff_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub strategy: StrategyParams,
}

impl AgentConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.user.clone(),
            password: self.password.clone(),
        }
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("host", &self.host),
            ("user", &self.user),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() || value == PLACEHOLDER {
                bail!("`{field}` is not configured");
            }
        }
        self.strategy.validate().context("invalid strategy")?;
        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AgentConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: AgentConfig =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(config)
}
