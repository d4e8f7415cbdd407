//! Sealing request.
//!
//! A validated `(scope, namespace, name, values)` tuple. Construction is the
//! only place the naming rules are checked, so everything downstream can
//! rely on them.

use std::fmt;

use crate::core::constants::MAX_KEY_LEN;
use crate::core::scope::{Label, Scope};
use crate::core::types::Values;
use crate::error::{Result, ValidationError};

/// What to seal and where it is allowed to be unsealed.
#[derive(Clone, PartialEq, Eq)]
pub struct SealRequest {
    scope: Scope,
    namespace: String,
    secret_name: String,
    values: Values,
}

impl SealRequest {
    /// Build a request, validating names and keys.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the namespace or secret name is empty or
    /// contains `/`, if `values` is empty, or if any key is not a valid
    /// secret data key.
    pub fn new(
        scope: Scope,
        namespace: impl Into<String>,
        secret_name: impl Into<String>,
        values: Values,
    ) -> Result<Self> {
        let namespace = namespace.into();
        let secret_name = secret_name.into();

        validate_name("namespace", &namespace)?;
        validate_name("secret name", &secret_name)?;
        if values.is_empty() {
            return Err(ValidationError::NoValues.into());
        }
        for key in values.keys() {
            validate_key(key)?;
        }

        Ok(Self {
            scope,
            namespace,
            secret_name,
            values,
        })
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Freshly submitted plaintext values.
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Binding label for this request.
    pub fn label(&self) -> Label {
        self.scope.label(&self.namespace, &self.secret_name)
    }
}

// Values are plaintext; only their keys may reach logs.
impl fmt::Debug for SealRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealRequest")
            .field("scope", &self.scope)
            .field("namespace", &self.namespace)
            .field("secret_name", &self.secret_name)
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Validate a namespace or secret name.
///
/// `/` is rejected because it separates namespace from name in strict
/// labels; allowing it would let `a/b` + `c` collide with `a` + `b/c`.
pub fn validate_name(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field).into());
    }
    if value.contains('/') {
        return Err(ValidationError::InvalidName {
            field,
            value: value.to_string(),
            reason: "must not contain '/'".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validate a secret data key.
///
/// Keys must be non-empty, at most 253 bytes, and use only
/// alphanumerics, `-`, `_` and `.`.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyField("key").into());
    }
    if key.len() > MAX_KEY_LEN {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: format!("longer than {} bytes", MAX_KEY_LEN),
        }
        .into());
    }
    if let Some((i, ch)) = key
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric() && !matches!(ch, '-' | '_' | '.'))
    {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: format!(
                "invalid character '{}' at position {}. Only alphanumerics, '-', '_' and '.' are allowed",
                ch,
                i + 1
            ),
        }
        .into());
    }
    Ok(())
}
