//! Cryptographic operations.
//!
//! Seals single values for the controller holding the private half of an
//! RSA key pair. The default backend is [`Hybrid`]: RSA-OAEP wraps a fresh
//! AES-256-GCM session key per value.
//!
//! ## Blob format
//!
//! ```text
//! +----------------+------------------------+---------------------------+
//! | len: u16 (BE)  | RSA-OAEP(session key)  | AES-256-GCM(value) || tag |
//! +----------------+------------------------+---------------------------+
//! ```
//!
//! The label is the OAEP label and, with [`LabelBinding::OaepAndAead`], the
//! AEAD additional data. A blob opened under any other label fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::scope::Label;
use crate::error::{CryptoError, ValidationError};

mod hybrid;
mod key;

pub use hybrid::Hybrid;
pub use key::{fingerprint, parse_public_key};
pub use rsa::{RsaPrivateKey, RsaPublicKey};

#[cfg(test)]
pub(crate) use hybrid::tests::test_key;

/// Value encryption backend.
///
/// Implementations must be non-deterministic: sealing the same input twice
/// must not produce comparable output.
pub trait Encryptor: Send + Sync {
    /// Seal `plaintext` for the holder of `public_key`, bound to `label`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError` if the key is unusable, the random source fails
    /// or the cipher rejects the input.
    fn seal(
        &self,
        public_key: &RsaPublicKey,
        label: &Label,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Where the label is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelBinding {
    /// OAEP label and AEAD additional data.
    #[default]
    OaepAndAead,
    /// OAEP label only, empty additional data.
    OaepOnly,
}

impl LabelBinding {
    /// Additional data passed to the AEAD for `label`.
    pub(crate) fn aad<'a>(&self, label: &'a Label) -> &'a [u8] {
        match self {
            Self::OaepAndAead => label.as_bytes(),
            Self::OaepOnly => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OaepAndAead => "oaep-and-aead",
            Self::OaepOnly => "oaep-only",
        }
    }
}

impl fmt::Display for LabelBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelBinding {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "oaep-and-aead" => Ok(Self::OaepAndAead),
            "oaep-only" => Ok(Self::OaepOnly),
            other => Err(ValidationError::InvalidName {
                field: "label binding",
                value: other.to_string(),
                reason: "expected oaep-and-aead or oaep-only".to_string(),
            }),
        }
    }
}
