//! File-backed key source.
//!
//! Reads the controller's public key from a PEM file on every call, so a
//! key rotated on disk is picked up by the next request.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rsa::RsaPublicKey;
use tracing::debug;

use super::KeySource;
use crate::core::cipher::{fingerprint, parse_public_key};
use crate::error::StoreError;

/// Public key stored as PEM at a fixed path.
#[derive(Debug, Clone)]
pub struct PemFileKeySource {
    path: PathBuf,
}

impl PemFileKeySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeySource for PemFileKeySource {
    async fn current_public_key(&self) -> Result<RsaPublicKey, StoreError> {
        let shown = self.path.display().to_string();
        let pem = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StoreError::NotFound(shown.clone()),
                _ => StoreError::Io(format!("{}: {}", shown, e)),
            })?;

        let key = parse_public_key(&pem)
            .map_err(|e| StoreError::Invalid(format!("{}: {}", shown, e)))?;

        if let Ok(fp) = fingerprint(&key) {
            debug!(path = %shown, fingerprint = %fp, "loaded public key");
        }
        Ok(key)
    }
}
