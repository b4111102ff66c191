//! Checker configuration.
//!
//! Hosts usually keep a `[querycheck]`-style table in their own TOML; the
//! table body deserializes into `CheckerConfig`.
//!
//! ```toml
//! mode = "log"
//! log_target = "app::queries"
//! ```

use crate::diagnostic::{
    DEFAULT_LOG_TARGET, DiagnosticsPolicy, FailFast, ForwardToSink, LogSink, RegisteredSink,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// DeliveryMode
///
/// How a type mismatch is delivered.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Abort the pass on the first mismatch.
    Fatal,
    /// Log every mismatch through the `log` facade and continue.
    Log,
    /// Follow the process-wide sink registration: forward when a sink is
    /// registered, abort otherwise.
    #[default]
    Registered,
}

///
/// CheckerConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    pub mode: DeliveryMode,
    /// Target used by `DeliveryMode::Log`.
    pub log_target: String,
}

impl CheckerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        if config.log_target.trim().is_empty() {
            return Err(ConfigError::EmptyLogTarget);
        }

        Ok(config)
    }

    /// Delivery policy matching `mode`.
    #[must_use]
    pub fn policy(&self) -> Box<dyn DiagnosticsPolicy> {
        match self.mode {
            DeliveryMode::Fatal => Box::new(FailFast),
            DeliveryMode::Log => Box::new(ForwardToSink::new(Arc::new(LogSink::new(
                self.log_target.clone(),
            )))),
            DeliveryMode::Registered => Box::new(RegisteredSink),
        }
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            mode: DeliveryMode::default(),
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid checker config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("log_target must not be empty")]
    EmptyLogTarget,
}
