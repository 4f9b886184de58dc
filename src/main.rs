//! Elsa Data administration CLI - entry point.

use clap::Parser;
use elsa_data_cli::aws::AwsBackend;
use elsa_data_cli::config::Config;
use elsa_data_cli::model::AppError;

/// Administration tool for deployed Elsa Data instances.
///
/// Discovers the deployment's command function via Cloud Map, runs the given
/// command on it, and prints the command's logs once it completes.
#[derive(Parser, Debug)]
#[command(name = "elsa-data-cli")]
#[command(version)]
#[command(about = "Run an admin command against a deployed Elsa Data instance")]
pub struct Args {
    /// Cloud Map namespace of the Elsa Data deployment [default: elsa-data]
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Cloud Map service publishing the command function [default: Command]
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Command words to send, joined with single spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    elsa_data_cli::logging::init();

    let config = Config::resolve(args.namespace, args.service, &args.command);
    let backend = AwsBackend::connect().await;

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = elsa_data_cli::pipeline::run(&backend, &config, &mut stdout).await {
        match err {
            // The remote handler's own message, addressed to the operator.
            AppError::CommandFailed { error } => eprintln!("{error}"),
            other => eprintln!("error: {other}"),
        }
        std::process::exit(1);
    }
}
