//! Public key parsing.

use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::RsaPublicKey;
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// Parse a PEM encoded RSA public key.
///
/// Accepts SubjectPublicKeyInfo (`BEGIN PUBLIC KEY`) and PKCS#1
/// (`BEGIN RSA PUBLIC KEY`).
///
/// # Errors
///
/// Returns `CryptoError::InvalidPublicKey` for any other input.
pub fn parse_public_key(pem: &str) -> Result<RsaPublicKey, CryptoError> {
    let pem = pem.trim();

    if pem.contains("-----BEGIN RSA PUBLIC KEY-----") {
        return RsaPublicKey::from_pkcs1_pem(pem)
            .map_err(|e| CryptoError::InvalidPublicKey(format!("pkcs1: {}", e)));
    }
    if pem.contains("-----BEGIN PUBLIC KEY-----") {
        return RsaPublicKey::from_public_key_pem(pem)
            .map_err(|e| CryptoError::InvalidPublicKey(format!("spki: {}", e)));
    }
    if pem.contains("-----BEGIN CERTIFICATE-----") {
        return Err(CryptoError::InvalidPublicKey(
            "certificates are not accepted, extract the key with `openssl x509 -pubkey -noout`"
                .to_string(),
        ));
    }

    Err(CryptoError::InvalidPublicKey(
        "expected a PEM encoded RSA public key".to_string(),
    ))
}

/// SHA-256 fingerprint of the key's SubjectPublicKeyInfo, hex encoded.
///
/// Identifies which controller key sealed a record without logging the key.
pub fn fingerprint(key: &RsaPublicKey) -> Result<String, CryptoError> {
    let der = key
        .to_public_key_der()
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
    let digest = Sha256::digest(der.as_bytes());
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}
