//! Sealant - seal key/value pairs into scope-bound SealedSecret records.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sealant::cli::output;
use sealant::cli::{execute, Cli};
use sealant::core::constants::LOG_ENV;
use sealant::error::{ConfigError, Error, PipelineError};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so the record on stdout stays pipeable
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sealant=debug")
        } else {
            EnvFilter::new("sealant=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        let (message, suggestion) = match &e {
            Error::Format(inner) => (
                format!("wrongly formatted value(s): {}", inner),
                Some("use KEY=value lines; wrap multi-line values in backticks"),
            ),
            Error::Config(ConfigError::InvalidValue {
                field: "controller.public_key",
                ..
            }) => (e.to_string(), Some("run: sealant seal --key controller.pem ...")),
            Error::Pipeline(inner) if inner.is_retryable() => {
                (e.to_string(), Some("the failure looks transient, try again"))
            }
            Error::Pipeline(PipelineError::KeyFetch(_)) => (
                e.to_string(),
                Some("fetch the key with: kubeseal --fetch-cert | openssl x509 -pubkey -noout"),
            ),
            _ => (e.to_string(), None),
        };

        output::error(&message);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
