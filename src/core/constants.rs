//! Constants used throughout sealant.
//!
//! Centralizes reserved annotation keys, record identifiers and
//! cipher sizes.

/// Annotation marking a record as decryptable anywhere in the cluster.
pub const CLUSTER_WIDE_ANNOTATION: &str = "sealedsecrets.bitnami.com/cluster-wide";

/// Annotation marking a record as decryptable under any name in its namespace.
pub const NAMESPACE_WIDE_ANNOTATION: &str = "sealedsecrets.bitnami.com/namespace-wide";

/// The only annotation keys that carry scope. Never preserved across seals.
pub const SCOPE_ANNOTATIONS: &[&str] = &[CLUSTER_WIDE_ANNOTATION, NAMESPACE_WIDE_ANNOTATION];

/// API version of the produced record.
pub const API_VERSION: &str = "bitnami.com/v1alpha1";

/// Kind of the produced record.
pub const KIND: &str = "SealedSecret";

/// AES-256 session key length in bytes.
pub const SESSION_KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Width of the wrapped-key length prefix.
pub const LENGTH_PREFIX_LEN: usize = 2;

/// Default number of values encrypted in parallel.
pub const DEFAULT_WORKERS: usize = 4;

/// Upper bound on encryption workers.
pub const MAX_WORKERS: usize = 64;

/// Default deadline for one sealing request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration file name (sealant.toml).
pub const CONFIG_FILE: &str = "sealant.toml";

/// Environment variable holding a comma-separated annotation allowlist.
pub const PRESERVE_ANNOTATIONS_ENV: &str = "SEALANT_PRESERVE_ANNOTATIONS";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SEALANT_LOG";

/// Longest Kubernetes data key.
pub const MAX_KEY_LEN: usize = 253;
