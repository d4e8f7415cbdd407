//! External collaborators.
//!
//! The sealing pipeline reads three things it does not own: the plaintext
//! currently stored under a secret name, the annotations of the record
//! previously sealed under that name, and the controller's current public
//! key. Each is a trait so the pipeline can run against a cluster client,
//! local files, or test doubles.
//!
//! ## Adding a New Collaborator
//!
//! 1. Implement the relevant trait(s)
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use async_trait::async_trait;
use rsa::RsaPublicKey;

use crate::core::annotations::Allowlist;
use crate::core::types::{AnnotationSet, Values};
use crate::error::StoreError;

mod fs;
mod memory;

pub use fs::PemFileKeySource;
pub use memory::{MemoryStore, StaticKeySource};

/// Source of the plaintext currently stored under a secret name.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Stored plaintext for `namespace/name`, `None` if no such secret.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    async fn get_plaintext(&self, namespace: &str, name: &str)
        -> Result<Option<Values>, StoreError>;
}

/// Source of annotations on a previously sealed record.
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Allow-listed annotations of the record at `namespace/name`. Empty if
    /// there is no such record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    async fn get_preserved(
        &self,
        namespace: &str,
        name: &str,
        allowlist: &Allowlist,
    ) -> Result<AnnotationSet, StoreError>;
}

/// Source of the controller's current public key.
///
/// Called once per sealing request; implementations must not assume the
/// key is stable between calls.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// # Errors
    ///
    /// Returns `StoreError` if the key cannot be fetched or parsed.
    async fn current_public_key(&self) -> Result<RsaPublicKey, StoreError>;
}
