//! RSA-OAEP + AES-256-GCM hybrid backend.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use tracing::trace;
use zeroize::Zeroizing;

use super::{Encryptor, LabelBinding};
use crate::core::constants::{LENGTH_PREFIX_LEN, NONCE_LEN, SESSION_KEY_LEN};
use crate::core::scope::Label;
use crate::error::CryptoError;

// Every session key seals exactly one value, so a fixed nonce never repeats
// under the same key.
const ZERO_NONCE: [u8; NONCE_LEN] = [0u8; NONCE_LEN];

/// Hybrid RSA/AES backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hybrid {
    binding: LabelBinding,
}

impl Hybrid {
    pub fn new(binding: LabelBinding) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> LabelBinding {
        self.binding
    }

    /// Open a blob produced by [`Encryptor::seal`] with the same binding.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Malformed` if the framing is broken,
    /// `UnwrapFailed` if the private key or label does not match the wrapped
    /// session key, and `OpenFailed` if the payload fails authentication.
    pub fn open(
        &self,
        private_key: &RsaPrivateKey,
        label: &Label,
        blob: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        trace!(ciphertext_len = blob.len(), "opening");

        if blob.len() < LENGTH_PREFIX_LEN {
            return Err(CryptoError::Malformed(format!(
                "{} bytes is shorter than the length prefix",
                blob.len()
            )));
        }
        let (prefix, rest) = blob.split_at(LENGTH_PREFIX_LEN);
        let wrapped_len = u16::from_be_bytes([prefix[0], prefix[1]]) as usize;
        if rest.len() < wrapped_len {
            return Err(CryptoError::Malformed(format!(
                "length prefix says {} bytes, only {} follow",
                wrapped_len,
                rest.len()
            )));
        }
        let (wrapped, sealed) = rest.split_at(wrapped_len);

        let session_key = Zeroizing::new(
            private_key
                .decrypt(oaep(label), wrapped)
                .map_err(|e| CryptoError::UnwrapFailed(e.to_string()))?,
        );
        if session_key.len() != SESSION_KEY_LEN {
            return Err(CryptoError::Malformed(format!(
                "session key is {} bytes, expected {}",
                session_key.len(),
                SESSION_KEY_LEN
            )));
        }

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(session_key.as_slice()));
        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(&ZERO_NONCE),
                Payload {
                    msg: sealed,
                    aad: self.binding.aad(label),
                },
            )
            .map_err(|_| CryptoError::OpenFailed)?;

        trace!(plaintext_len = plaintext.len(), "opened");
        Ok(plaintext)
    }
}

impl Encryptor for Hybrid {
    fn name(&self) -> &'static str {
        "rsa-oaep-aes-gcm"
    }

    fn seal(
        &self,
        public_key: &RsaPublicKey,
        label: &Label,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        trace!(
            modulus_bytes = public_key.size(),
            plaintext_len = plaintext.len(),
            "sealing"
        );

        let mut session_key = Zeroizing::new([0u8; SESSION_KEY_LEN]);
        OsRng
            .try_fill_bytes(session_key.as_mut())
            .map_err(|e| CryptoError::Random(e.to_string()))?;

        let wrapped = public_key
            .encrypt(&mut OsRng, oaep(label), session_key.as_slice())
            .map_err(|e| CryptoError::WrapFailed(e.to_string()))?;
        let prefix =
            u16::try_from(wrapped.len()).map_err(|_| CryptoError::KeyTooLarge(wrapped.len()))?;

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(session_key.as_slice()));
        let sealed = cipher
            .encrypt(
                Nonce::from_slice(&ZERO_NONCE),
                Payload {
                    msg: plaintext,
                    aad: self.binding.aad(label),
                },
            )
            .map_err(|_| CryptoError::SealFailed)?;

        let mut blob = Vec::with_capacity(LENGTH_PREFIX_LEN + wrapped.len() + sealed.len());
        blob.extend_from_slice(&prefix.to_be_bytes());
        blob.extend_from_slice(&wrapped);
        blob.extend_from_slice(&sealed);

        trace!(ciphertext_len = blob.len(), "sealed");
        Ok(blob)
    }
}

fn oaep(label: &Label) -> Oaep {
    Oaep::new_with_label::<Sha256, _>(label.as_str())
}
