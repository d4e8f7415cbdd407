//! In-memory collaborators.
//!
//! Seeded up front and read-only afterwards. Used by the CLI, which loads
//! existing values from local files, and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use rsa::RsaPublicKey;
use tracing::trace;

use super::{AnnotationStore, KeySource, SecretStore};
use crate::core::annotations::Allowlist;
use crate::core::types::{AnnotationSet, Values};
use crate::error::StoreError;

type ObjectKey = (String, String);

/// Plaintext and annotations keyed by `(namespace, name)`.
#[derive(Default)]
pub struct MemoryStore {
    secrets: HashMap<ObjectKey, Values>,
    annotations: HashMap<ObjectKey, AnnotationSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed stored plaintext for `namespace/name`.
    pub fn with_secret(mut self, namespace: &str, name: &str, values: Values) -> Self {
        self.secrets
            .insert((namespace.to_string(), name.to_string()), values);
        self
    }

    /// Seed annotations of a previously sealed record at `namespace/name`.
    pub fn with_annotations(
        mut self,
        namespace: &str,
        name: &str,
        annotations: AnnotationSet,
    ) -> Self {
        self.annotations
            .insert((namespace.to_string(), name.to_string()), annotations);
        self
    }
}

// Values are plaintext; report counts only.
impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("secrets", &self.secrets.len())
            .field("annotations", &self.annotations.len())
            .finish()
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn get_plaintext(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Values>, StoreError> {
        let found = self
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned();
        trace!(namespace, name, found = found.is_some(), "secret lookup");
        Ok(found)
    }
}

#[async_trait]
impl AnnotationStore for MemoryStore {
    async fn get_preserved(
        &self,
        namespace: &str,
        name: &str,
        allowlist: &Allowlist,
    ) -> Result<AnnotationSet, StoreError> {
        Ok(self
            .annotations
            .get(&(namespace.to_string(), name.to_string()))
            .map(|annotations| allowlist.select(annotations))
            .unwrap_or_default())
    }
}

/// A fixed public key.
#[derive(Debug, Clone)]
pub struct StaticKeySource(RsaPublicKey);

impl StaticKeySource {
    pub fn new(key: RsaPublicKey) -> Self {
        Self(key)
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn current_public_key(&self) -> Result<RsaPublicKey, StoreError> {
        Ok(self.0.clone())
    }
}
