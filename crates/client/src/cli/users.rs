//! User CLI commands.

use clap::{Args, Parser, Subcommand};
use nvl_core::{UserDraft, UserField};

/// User management commands.
///
/// Without an action the usage summary is printed.
#[derive(Debug, Parser)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: Option<UserAction>,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Register a new user.
    Register {
        #[command(flatten)]
        issuer: IssuerArgs,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// List all users.
    List {
        #[command(flatten)]
        issuer: IssuerArgs,
    },
    /// Show a user.
    Info {
        /// User ID. Prompts with a menu when omitted.
        id: Option<String>,
        #[command(flatten)]
        issuer: IssuerArgs,
    },
    /// Update a user.
    Update {
        /// User ID. Prompts with a menu when omitted.
        id: Option<String>,
        #[command(flatten)]
        issuer: IssuerArgs,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Delete a user.
    Delete {
        /// User ID. Prompts with a menu when omitted.
        id: Option<String>,
        #[command(flatten)]
        issuer: IssuerArgs,
    },
}

/// Issuer selection.
#[derive(Debug, Clone, Default, Args)]
pub struct IssuerArgs {
    /// Issuer ID. Prompts when omitted and several issuers are configured.
    #[arg(long, short = 'i', env = "NVL_ISSUER")]
    pub issuer: Option<String>,
}

/// Profile attributes that skip the matching prompt when given.
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    /// Full name.
    #[arg(long, short = 'n')]
    pub name: Option<String>,
    /// Given name.
    #[arg(long, short = 'g')]
    pub given: Option<String>,
    /// Middle name.
    #[arg(long, short = 'm')]
    pub middle: Option<String>,
    /// Family name.
    #[arg(long, short = 'f')]
    pub family: Option<String>,
    /// Nickname.
    #[arg(long, short = 'k')]
    pub nickname: Option<String>,
    /// Preferred username.
    #[arg(long, short = 'u')]
    pub username: Option<String>,
    /// Profile page URI.
    #[arg(long, short = 'p')]
    pub profile: Option<String>,
    /// Picture URI.
    #[arg(long)]
    pub picture: Option<String>,
    /// Website URI.
    #[arg(long, short = 'w')]
    pub website: Option<String>,
    /// Email address.
    #[arg(long, short = 'e')]
    pub email: Option<String>,
}

impl ProfileArgs {
    /// Attributes supplied on the command line.
    pub fn to_draft(&self) -> UserDraft {
        [
            (UserField::Name, &self.name),
            (UserField::GivenName, &self.given),
            (UserField::MiddleName, &self.middle),
            (UserField::FamilyName, &self.family),
            (UserField::Nickname, &self.nickname),
            (UserField::PreferredUsername, &self.username),
            (UserField::Profile, &self.profile),
            (UserField::Picture, &self.picture),
            (UserField::Website, &self.website),
            (UserField::Email, &self.email),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}
