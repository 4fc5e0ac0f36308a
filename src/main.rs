//! nfvctl binary
//!
//! Thin front end over the spec subsystem: loads a request spec from disk,
//! applies defaults, validates, and reports. Dispatch to the orchestrator
//! lives behind a separate transport layer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nfvctl::specs::{self, Encoding, SpecKind};
use nfvctl::Result;

/// nfvctl - telco-cloud orchestrator client
#[derive(Parser, Debug)]
#[command(name = "nfvctl")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a request spec and run domain validation
    Validate(ValidateArgs),
    /// List the recognized request-spec kinds
    Kinds,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Spec file to validate (JSON or YAML)
    file: PathBuf,

    /// Encoding override; derived from the file suffix when omitted
    #[arg(long)]
    format: Option<Encoding>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate(args) => validate(args),
        Commands::Kinds => {
            for kind in SpecKind::ALL {
                println!("{kind}");
            }
            Ok(())
        }
    }
}

fn validate(args: ValidateArgs) -> Result<()> {
    tracing::debug!(file = %args.file.display(), "loading spec");
    let mut spec = specs::from_file(&args.file, args.format)?;
    match spec.validate() {
        Ok(()) => {
            println!("{}: valid {} spec", args.file.display(), spec.kind());
            Ok(())
        }
        Err(err) => {
            println!("{}: {} ({})", args.file.display(), err, err.category());
            Err(err)
        }
    }
}
