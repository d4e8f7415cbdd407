//! Error types.
//!
//! Every component has its own error enum; [`Error`] wraps them so the
//! library and the CLI can share one `Result` alias.

use std::time::Duration;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed key/value text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("empty input")]
    Empty,

    #[error("missing '=' at line: {line}")]
    MissingSeparator { line: usize },

    #[error("empty key at line: {line}")]
    EmptyKey { line: usize },

    #[error("unterminated multi-line value for '{key}' opened at line: {line}")]
    Unterminated { key: String, line: usize },
}

/// A request that cannot be sealed as given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("invalid {field} '{value}': {reason}")]
    InvalidName {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("no key-value pairs found")]
    NoValues,

    #[error("unknown scope '{0}' (expected cluster, namespace or strict)")]
    UnknownScope(String),
}

/// Key, randomness or cipher failure. Never worth retrying with the same key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("random source failed: {0}")]
    Random(String),

    #[error("session key wrap failed: {0}")]
    WrapFailed(String),

    #[error("wrapped session key is {0} bytes, larger than the 2-byte length prefix allows")]
    KeyTooLarge(usize),

    #[error("payload seal failed")]
    SealFailed,

    #[error("malformed ciphertext: {0}")]
    Malformed(String),

    #[error("session key unwrap failed: {0}")]
    UnwrapFailed(String),

    #[error("payload open failed: wrong key, label or corrupted ciphertext")]
    OpenFailed,
}

/// Failure reported by an external collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("read failed: {0}")]
    Io(String),

    #[error("invalid data: {0}")]
    Invalid(String),
}

impl StoreError {
    /// Whether retrying the same call later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Failure of a whole sealing request. Never carries a partial record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("failed to get existing secret data: {0}")]
    SecretLookup(#[source] StoreError),

    #[error("failed to get existing sealed-secret annotations: {0}")]
    AnnotationLookup(#[source] StoreError),

    #[error("failed to get public key: {0}")]
    KeyFetch(#[source] StoreError),

    #[error("failed to encrypt value '{key}': {source}")]
    Encrypt {
        key: String,
        #[source]
        source: CryptoError,
    },

    #[error("encryption worker failed: {0}")]
    Worker(String),

    #[error("sealing cancelled")]
    Cancelled,

    #[error("sealing timed out after {0:?}")]
    TimedOut(Duration),
}

impl PipelineError {
    /// Whether the caller may retry the request unchanged.
    ///
    /// Missing resources and crypto failures are final; unreachable
    /// collaborators and deadlines are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::SecretLookup(e) | Self::AnnotationLookup(e) | Self::KeyFetch(e) => {
                e.is_transient()
            }
            Self::TimedOut(_) => true,
            Self::Encrypt { .. } | Self::Worker(_) | Self::Cancelled => false,
        }
    }

    /// Whether a collaborator reported a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SecretLookup(StoreError::NotFound(_))
                | Self::AnnotationLookup(StoreError::NotFound(_))
                | Self::KeyFetch(StoreError::NotFound(_))
        )
    }
}

/// Configuration file problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
