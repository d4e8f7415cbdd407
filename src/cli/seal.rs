//! Seal command.
//!
//! Reads values in the key/value text format, merges them with an optional
//! file of existing plaintext, and prints the sealed record as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::cli::output;
use crate::core::cipher::{Hybrid, LabelBinding};
use crate::core::config::Config;
use crate::core::domain::SealRequest;
use crate::core::parser;
use crate::core::pipeline::Sealer;
use crate::core::scope::Scope;
use crate::core::store::{MemoryStore, PemFileKeySource};
use crate::error::{ConfigError, Result};

/// Arguments of `sealant seal`.
#[derive(Args, Debug)]
pub struct SealArgs {
    /// Scope: cluster, namespace or strict
    #[arg(short, long, default_value = "strict")]
    pub scope: Scope,

    /// Target namespace
    #[arg(short, long)]
    pub namespace: String,

    /// Target secret name
    #[arg(long)]
    pub name: String,

    /// File with KEY=value lines, `-` for stdin
    #[arg(short = 'f', long, default_value = "-")]
    pub values: String,

    /// Controller public key (PEM). Overrides controller.public_key
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// File with the plaintext currently stored under this name
    #[arg(long)]
    pub existing: Option<PathBuf>,

    /// File with annotations of the previously sealed record
    #[arg(long)]
    pub annotations: Option<PathBuf>,

    /// Extra comma-separated annotation keys to preserve
    #[arg(long)]
    pub preserve: Option<String>,

    /// Values encrypted in parallel
    #[arg(long)]
    pub workers: Option<usize>,

    /// Deadline in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Label binding: oaep-and-aead or oaep-only
    #[arg(long)]
    pub label_binding: Option<LabelBinding>,
}

/// Execute the seal command.
///
/// # Errors
///
/// Returns an error if any input fails to parse or validate, the key cannot
/// be read, or sealing fails.
pub fn execute(args: SealArgs, config: &Config) -> Result<()> {
    let values = parser::parse(&read_input(&args.values)?)?;
    let request = SealRequest::new(args.scope, &args.namespace, &args.name, values)?;
    info!(
        scope = %request.scope(),
        namespace = request.namespace(),
        name = request.secret_name(),
        "creating sealed secret"
    );

    let mut store = MemoryStore::new();
    if let Some(path) = &args.existing {
        let existing = parser::parse(&read_file(path)?)?;
        store = store.with_secret(&args.namespace, &args.name, existing);
    }
    if let Some(path) = &args.annotations {
        let annotations = parser::parse(&read_file(path)?)?;
        store = store.with_annotations(&args.namespace, &args.name, annotations);
    }

    let config = with_overrides(config, &args)?;
    let key_path = config
        .controller
        .public_key
        .clone()
        .ok_or(ConfigError::InvalidValue {
            field: "controller.public_key",
            reason: "not set, pass --key".to_string(),
        })?;
    let timeout = config.timeout();

    let store = Arc::new(store);
    let sealer = Sealer::new(
        store.clone(),
        store,
        Arc::new(PemFileKeySource::new(key_path)),
    )
    .with_encryptor(Arc::new(Hybrid::new(config.sealing.label_binding)))
    .with_allowlist(config.allowlist())
    .with_workers(config.sealing.workers);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let record = runtime.block_on(sealer.seal_with_timeout(&request, timeout))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    output::success(&format!(
        "sealed {} value(s) for {}/{}",
        record.encrypted_data().len(),
        request.namespace(),
        request.secret_name()
    ));
    Ok(())
}

/// Apply command-line flags over `config` and validate the result.
///
/// Flags go through the same checks as the config file.
fn with_overrides(config: &Config, args: &SealArgs) -> Result<Config> {
    let mut config = config.clone().with_preserve_csv(args.preserve.clone());
    if let Some(key) = &args.key {
        config.controller.public_key = Some(key.clone());
    }
    if let Some(workers) = args.workers {
        config.sealing.workers = workers;
    }
    if let Some(timeout) = args.timeout {
        config.sealing.timeout_secs = timeout;
    }
    if let Some(binding) = args.label_binding {
        config.sealing.label_binding = binding;
    }
    config.validate()?;
    Ok(config)
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        Ok(std::io::read_to_string(std::io::stdin())?)
    } else {
        read_file(Path::new(source))
    }
}

fn read_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
