//! Sealing pipeline.
//!
//! One request runs strictly in order:
//!
//! ```text
//! read existing plaintext ┐
//! read kept annotations   ├─ concurrently, all must finish
//! fetch public key        ┘
//!         │
//! merge values → resolve label → encrypt each value (bounded fan-out)
//!         │
//! merge annotations → SealedRecord
//! ```
//!
//! Either a complete record comes out or an error does; partial results are
//! dropped. Cancellation is cooperative: the token is checked at every await
//! point and outstanding encryption tasks are aborted, but an RSA operation
//! already running on a blocking thread finishes on its own.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use rsa::RsaPublicKey;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::core::annotations::{merge_annotations, Allowlist};
use crate::core::cipher::{fingerprint, Encryptor, Hybrid};
use crate::core::constants::{DEFAULT_WORKERS, MAX_WORKERS};
use crate::core::domain::{SealRequest, SealedRecord, SealedValue};
use crate::core::scope::Label;
use crate::core::store::{AnnotationStore, KeySource, SecretStore};
use crate::core::types::{AnnotationSet, SecretKey, Values};
use crate::error::{PipelineError, Result, StoreError};

/// Merge stored plaintext with freshly submitted values.
///
/// Submitted values win; keys only present in storage are carried through
/// so editing one field keeps the others sealed.
pub fn merge_values(existing: Values, fresh: &Values) -> Values {
    let mut merged = existing;
    for (key, value) in fresh {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Seals requests against a set of collaborators.
pub struct Sealer {
    secrets: Arc<dyn SecretStore>,
    annotations: Arc<dyn AnnotationStore>,
    keys: Arc<dyn KeySource>,
    encryptor: Arc<dyn Encryptor>,
    allowlist: Allowlist,
    workers: usize,
}

impl Sealer {
    /// Create a sealer with the default hybrid encryptor, an empty
    /// allowlist and the default worker count.
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        annotations: Arc<dyn AnnotationStore>,
        keys: Arc<dyn KeySource>,
    ) -> Self {
        Self {
            secrets,
            annotations,
            keys,
            encryptor: Arc::new(Hybrid::default()),
            allowlist: Allowlist::default(),
            workers: DEFAULT_WORKERS,
        }
    }

    pub fn with_encryptor(mut self, encryptor: Arc<dyn Encryptor>) -> Self {
        self.encryptor = encryptor;
        self
    }

    /// Annotation keys to carry over from the previous record.
    pub fn with_allowlist(mut self, allowlist: Allowlist) -> Self {
        self.allowlist = allowlist;
        self
    }

    /// Maximum values encrypted in parallel, clamped to `1..=64`.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, MAX_WORKERS);
        self
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Seal `request`, merging it with whatever is stored under its name.
    ///
    /// The public key is fetched anew on every call.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError` if a collaborator fails, any value fails to
    /// encrypt, or `cancel` fires first.
    pub async fn seal(
        &self,
        request: &SealRequest,
        cancel: &CancellationToken,
    ) -> Result<SealedRecord> {
        let namespace = request.namespace();
        let name = request.secret_name();
        debug!(
            scope = %request.scope(),
            namespace,
            name,
            keys = request.values().len(),
            "sealing"
        );

        let reads = async {
            tokio::try_join!(
                self.existing_values(namespace, name),
                self.existing_annotations(namespace, name),
                self.public_key(),
            )
        };

        let (existing, annotations, public_key) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled.into()),
            result = reads => result?,
        };

        self.seal_with(request, existing, &annotations, public_key, cancel)
            .await
    }

    /// Like [`seal`](Self::seal), giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::TimedOut` if the deadline passes first, or
    /// any error [`seal`](Self::seal) returns.
    pub async fn seal_with_timeout(
        &self,
        request: &SealRequest,
        timeout: Duration,
    ) -> Result<SealedRecord> {
        let cancel = CancellationToken::new();
        match tokio::time::timeout(timeout, self.seal(request, &cancel)).await {
            Ok(result) => result,
            Err(_) => {
                cancel.cancel();
                warn!(
                    namespace = request.namespace(),
                    name = request.secret_name(),
                    ?timeout,
                    "sealing timed out"
                );
                Err(PipelineError::TimedOut(timeout).into())
            }
        }
    }

    /// Seal `request` given already fetched inputs.
    ///
    /// `existing_annotations` is filtered through the allowlist here as
    /// well, so callers may pass a record's full annotation set.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Encrypt` for the first value that fails to
    /// encrypt, or `Cancelled` if `cancel` fires first.
    pub async fn seal_with(
        &self,
        request: &SealRequest,
        existing: Values,
        existing_annotations: &AnnotationSet,
        public_key: RsaPublicKey,
        cancel: &CancellationToken,
    ) -> Result<SealedRecord> {
        let carried = existing.keys().filter(|k| !request.values().contains_key(*k)).count();
        let merged = merge_values(existing, request.values());
        let label = request.label();
        let scope_annotations = request.scope().annotations();
        debug!(
            keys = merged.len(),
            carried,
            label = %label,
            encryptor = self.encryptor.name(),
            "merged values"
        );

        let encrypted = self.encrypt_all(merged, label, public_key, cancel).await?;
        let annotations =
            merge_annotations(&scope_annotations, existing_annotations, &self.allowlist);

        debug!(
            sealed = encrypted.len(),
            annotations = annotations.len(),
            "sealed"
        );
        Ok(SealedRecord::new(
            request.secret_name(),
            request.namespace(),
            annotations,
            scope_annotations,
            encrypted,
        ))
    }

    /// Encrypt every value, at most `workers` at a time.
    async fn encrypt_all(
        &self,
        values: Values,
        label: Label,
        public_key: RsaPublicKey,
        cancel: &CancellationToken,
    ) -> Result<BTreeMap<SecretKey, SealedValue>> {
        let public_key = Arc::new(public_key);
        let label = Arc::new(label);
        let mut pending = values.into_iter();
        let mut tasks = JoinSet::new();
        let mut sealed = BTreeMap::new();

        loop {
            while tasks.len() < self.workers {
                let Some((key, value)) = pending.next() else {
                    break;
                };
                let encryptor = Arc::clone(&self.encryptor);
                let public_key = Arc::clone(&public_key);
                let label = Arc::clone(&label);
                tasks.spawn_blocking(move || {
                    let value = Zeroizing::new(value);
                    let result = encryptor.seal(&public_key, &label, value.as_bytes());
                    (key, result)
                });
            }

            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                joined = tasks.join_next() => Some(joined),
            };
            let Some(joined) = next else {
                tasks.abort_all();
                return Err(PipelineError::Cancelled.into());
            };
            let Some(joined) = joined else {
                break;
            };

            let (key, result) = joined.map_err(|e| PipelineError::Worker(e.to_string()))?;
            match result {
                Ok(blob) => {
                    trace!(key = %key, ciphertext_len = blob.len(), "value sealed");
                    sealed.insert(key, SealedValue::new(blob));
                }
                Err(source) => {
                    tasks.abort_all();
                    warn!(key = %key, error = %source, "encryption failed, discarding record");
                    return Err(PipelineError::Encrypt { key, source }.into());
                }
            }
        }

        Ok(sealed)
    }

    async fn existing_values(
        &self,
        namespace: &str,
        name: &str,
    ) -> std::result::Result<Values, PipelineError> {
        match self.secrets.get_plaintext(namespace, name).await {
            Ok(Some(values)) => Ok(values),
            Ok(None) => {
                debug!(namespace, name, "no stored secret");
                Ok(Values::new())
            }
            Err(StoreError::NotFound(reason)) => {
                warn!(namespace, name, %reason, "secret not found");
                Ok(Values::new())
            }
            Err(e) => Err(PipelineError::SecretLookup(e)),
        }
    }

    async fn existing_annotations(
        &self,
        namespace: &str,
        name: &str,
    ) -> std::result::Result<AnnotationSet, PipelineError> {
        if self.allowlist.is_empty() {
            return Ok(AnnotationSet::new());
        }
        match self
            .annotations
            .get_preserved(namespace, name, &self.allowlist)
            .await
        {
            Ok(annotations) => Ok(annotations),
            Err(StoreError::NotFound(_)) => Ok(AnnotationSet::new()),
            Err(e) => Err(PipelineError::AnnotationLookup(e)),
        }
    }

    async fn public_key(&self) -> std::result::Result<RsaPublicKey, PipelineError> {
        let key = self
            .keys
            .current_public_key()
            .await
            .map_err(PipelineError::KeyFetch)?;
        if let Ok(fp) = fingerprint(&key) {
            debug!(fingerprint = %fp, "fetched public key");
        }
        Ok(key)
    }
}
