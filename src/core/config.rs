//! Configuration file management.
//!
//! Handles reading and validating `sealant.toml`:
//!
//! ```toml
//! [controller]
//! public_key = "/etc/sealant/controller.pem"
//!
//! [annotations]
//! preserve = ["argocd.argoproj.io/sync-wave"]
//!
//! [sealing]
//! workers = 4
//! timeout_secs = 30
//! label_binding = "oaep-and-aead"
//! ```
//!
//! Every section is optional. `SEALANT_PRESERVE_ANNOTATIONS` adds
//! comma-separated keys to `annotations.preserve`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::annotations::Allowlist;
use crate::core::cipher::LabelBinding;
use crate::core::constants::{
    CONFIG_FILE, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS, MAX_WORKERS, PRESERVE_ANNOTATIONS_ENV,
};
use crate::core::scope::is_scope_annotation;
use crate::error::{ConfigError, Result};

/// Contents of `sealant.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub controller: ControllerConfig,
    pub annotations: AnnotationsConfig,
    pub sealing: SealingConfig,
}

/// Where the controller's public key comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// PEM file holding the controller's RSA public key
    pub public_key: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationsConfig {
    /// Annotation keys carried over from the previous record
    pub preserve: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SealingConfig {
    /// Values encrypted in parallel
    pub workers: usize,
    /// Deadline for one sealing request
    pub timeout_secs: u64,
    /// Where the label is authenticated
    pub label_binding: LabelBinding,
}

impl Default for SealingConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            label_binding: LabelBinding::default(),
        }
    }
}

impl Config {
    /// Path of the default configuration file in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// `sealant.toml` in the current directory is read if present and
    /// defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit file,
    /// `ConfigError::Parse` for malformed TOML and `ConfigError::InvalidValue`
    /// if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.display().to_string()).into());
                }
                Self::read(path)?
            }
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::read(&path)?
                } else {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };

        let config = config.with_preserve_csv(std::env::var(PRESERVE_ANNOTATIONS_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        debug!(
            preserve = config.annotations.preserve.len(),
            workers = config.sealing.workers,
            "config loaded"
        );
        Ok(config)
    }

    /// Add comma-separated annotation keys to the preserve list.
    pub fn with_preserve_csv(mut self, csv: Option<String>) -> Self {
        if let Some(csv) = csv {
            self.annotations
                .preserve
                .extend(Allowlist::from_csv(&csv).iter().map(str::to_string));
        }
        self
    }

    /// Allowlist built from `annotations.preserve`.
    pub fn allowlist(&self) -> Allowlist {
        Allowlist::new(&self.annotations.preserve)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.sealing.timeout_secs)
    }

    /// Validate value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.sealing.workers == 0 || self.sealing.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidValue {
                field: "sealing.workers",
                reason: format!("must be between 1 and {}", MAX_WORKERS),
            }
            .into());
        }

        if self.sealing.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sealing.timeout_secs",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        for key in &self.annotations.preserve {
            if is_scope_annotation(key.trim()) {
                return Err(ConfigError::InvalidValue {
                    field: "annotations.preserve",
                    reason: format!("'{}' is a scope annotation and is never preserved", key),
                }
                .into());
            }
        }

        if let Some(path) = &self.controller.public_key {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "controller.public_key",
                    reason: "empty path".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
