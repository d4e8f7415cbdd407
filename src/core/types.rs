//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;

/// A data key inside a secret (e.g. `DATABASE_URL`, `tls.crt`).
pub type SecretKey = String;

/// A plaintext secret value.
pub type PlainValue = String;

/// Key-unique plaintext mapping. Iteration order carries no meaning.
pub type Values = BTreeMap<SecretKey, PlainValue>;

/// Metadata annotations of a record.
pub type AnnotationSet = BTreeMap<String, String>;
