//! Label command.
//!
//! Shows what a scope resolves to without sealing anything.

use clap::Args;

use crate::cli::output;
use crate::core::domain::validate_name;
use crate::core::scope::{resolve_annotations, resolve_label, Scope};
use crate::error::Result;

/// Arguments of `sealant label`.
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Scope: cluster, namespace or strict
    #[arg(short, long, default_value = "strict")]
    pub scope: Scope,

    /// Target namespace
    #[arg(short, long)]
    pub namespace: String,

    /// Target secret name
    #[arg(long)]
    pub name: String,
}

/// Execute the label command.
///
/// # Errors
///
/// Returns `ValidationError` if the namespace or name is invalid.
pub fn execute(args: LabelArgs) -> Result<()> {
    validate_name("namespace", &args.namespace)?;
    validate_name("secret name", &args.name)?;

    let label = resolve_label(args.scope, &args.namespace, &args.name);
    let annotations = resolve_annotations(args.scope);

    output::kv("scope:", args.scope);
    output::kv(
        "label:",
        if label.is_empty() {
            "(empty)"
        } else {
            label.as_str()
        },
    );
    if annotations.is_empty() {
        output::kv("annotations:", "(none)");
    }
    for (key, value) in &annotations {
        output::kv("annotations:", format!("{}={}", key, value));
    }
    Ok(())
}
