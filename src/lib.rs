//! Sealant - seal plaintext key/value pairs into scope-bound SealedSecret records.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── seal          # Parse, merge, encrypt, print the record
//! │   ├── label         # Show the label and annotations for a scope
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── parser        # Key/value text with backtick blocks
//!     ├── scope         # Scope → label and marker annotations
//!     ├── annotations   # Allowlist and annotation merging
//!     ├── cipher/       # Encryption backends
//!     │   ├── mod       # Encryptor trait, label binding
//!     │   ├── hybrid    # RSA-OAEP + AES-256-GCM
//!     │   └── key       # PEM public key parsing
//!     ├── store/        # External collaborators
//!     │   ├── mod       # SecretStore, AnnotationStore, KeySource
//!     │   ├── memory    # In-memory stores
//!     │   └── fs        # PEM file key source
//!     ├── domain/       # SealRequest, SealedRecord
//!     ├── pipeline      # Merge, encrypt, assemble
//!     └── config        # sealant.toml
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sealant::core::parser;
//! use sealant::core::pipeline::Sealer;
//! use sealant::core::scope::Scope;
//! use sealant::core::store::{MemoryStore, PemFileKeySource};
//! use sealant::core::domain::SealRequest;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> sealant::error::Result<()> {
//! let values = parser::parse("DATABASE_URL=postgres://localhost/app")?;
//! let request = SealRequest::new(Scope::Strict, "team-a", "db", values)?;
//!
//! let store = Arc::new(MemoryStore::new());
//! let sealer = Sealer::new(
//!     store.clone(),
//!     store,
//!     Arc::new(PemFileKeySource::new("controller.pem")),
//! );
//! let record = sealer.seal(&request, &CancellationToken::new()).await?;
//! println!("{}", serde_json::to_string_pretty(&record)?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
