//! CLI command definitions.

pub mod users;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command groups that accept the `group:task` shorthand.
const COMMAND_GROUPS: &[&str] = &["user"];

/// Administer accounts on an identity provider.
#[derive(Debug, Parser)]
#[command(name = "nvl")]
#[command(version, about = "Administer accounts on an identity provider", long_about = None)]
pub struct Cli {
    /// Directory holding issuer configuration.
    #[arg(long, env = "NVL_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output with colors.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// User management.
    User(users::UserCommand),
}

/// Splits the first `group:task` argument into `group task`, so that
/// `nvl user:list` and `nvl user list` are the same invocation.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut split = false;
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough || split {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let shorthand = arg.to_str().and_then(|s| s.split_once(':')).and_then(
            |(group, task)| {
                (COMMAND_GROUPS.contains(&group) && !task.is_empty())
                    .then(|| (group.to_string(), task.to_string()))
            },
        );

        match shorthand {
            Some((group, task)) => {
                normalized.push(group.into());
                normalized.push(task.into());
                split = true;
            }
            None => normalized.push(arg),
        }
    }

    normalized
}
