//! Test support utilities for sealant integration tests.
//!
//! Provides a scratch directory holding a controller public key, collaborator
//! doubles, and helper commands.

#![allow(dead_code)]

pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use doubles::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use std::sync::OnceLock;

use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tempfile::TempDir;

/// Controller key pair shared by every test in a binary.
///
/// 1024 bits keeps generation fast; the blob layout does not depend on it.
pub fn controller_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::rngs::OsRng, 1024).expect("failed to generate key")
    })
}

pub fn controller_public_key() -> RsaPublicKey {
    controller_key().to_public_key()
}

/// Test environment with an isolated temp directory.
///
/// The directory holds `controller.pem`. Child processes run with
/// `.current_dir()` pointing at it so tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    /// Create a directory containing the controller public key.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let pem = controller_public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("failed to encode key");
        std::fs::write(dir.path().join(KEY_FILE), pem).expect("failed to write key");
        Self { dir }
    }

    /// Write `contents` to `name` inside the test directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }

    pub fn key_path(&self) -> PathBuf {
        self.dir.path().join(KEY_FILE)
    }
}
