//! nvl CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use nvl_client::cli::{normalize_args, Cli, Commands};
use nvl_client::client::HttpConnector;
use nvl_client::commands::{self, CommandContext};
use nvl_client::config::Config;
use nvl_client::issuers::IssuerStore;
use nvl_client::prompt::TerminalPrompter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let config = Config::from_env().with_config_dir(cli.config_dir);

    // Logs go to stderr so stdout stays clean for `--format json`.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let issuers = IssuerStore::new(config.issuers_dir());
    let connector = HttpConnector::new(config.http_timeout());
    let prompter = TerminalPrompter;
    let ctx = CommandContext {
        issuers: &issuers,
        connector: &connector,
        prompter: &prompter,
        format: cli.format,
    };

    let Commands::User(command) = cli.command;
    match commands::run(&ctx, command).await {
        Ok(output) => {
            if !output.is_empty() {
                anstream::println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            anstream::eprintln!("{}", err.report());
            ExitCode::FAILURE
        }
    }
}
