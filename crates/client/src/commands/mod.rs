//! Command handlers.
//!
//! Handlers return the text to print or a typed error. Deciding the exit
//! status is left to the caller.

pub mod users;

use nvl_core::display::select_label;

use crate::cli::users::{UserAction, UserCommand};
use crate::cli::OutputFormat;
use crate::client::{BearerToken, Connector, UsersApi};
use crate::error::{ClientError, Result};
use crate::issuers::IssuerResolver;
use crate::prompt::{Choice, Prompter};

/// Collaborators shared by every handler.
pub struct CommandContext<'a> {
    pub issuers: &'a dyn IssuerResolver,
    pub connector: &'a dyn Connector,
    pub prompter: &'a dyn Prompter,
    pub format: OutputFormat,
}

impl CommandContext<'_> {
    /// Resolve the issuer and build a client bound to it.
    fn connect(&self, issuer_id: Option<&str>) -> Result<Box<dyn UsersApi>> {
        let issuer = self.issuers.resolve(issuer_id, self.prompter)?;
        tracing::debug!(issuer = %issuer.name, url = %issuer.issuer, "resolved issuer");
        self.connector.connect(&issuer)
    }

    /// Use `id` when given, otherwise list users and let the operator pick.
    async fn resolve_user_id(
        &self,
        client: &dyn UsersApi,
        token: &BearerToken,
        id: Option<&str>,
    ) -> Result<String> {
        if let Some(id) = id {
            return Ok(id.to_string());
        }

        let users = client.list_users(token).await?;
        if users.is_empty() {
            return Err(ClientError::NotFound {
                resource: "users".to_string(),
            });
        }

        let choices: Vec<Choice> = users
            .iter()
            .map(|user| Choice {
                label: select_label(user),
                value: user.id_str().to_string(),
            })
            .collect();
        self.prompter.select("Select a user", &choices)
    }
}

/// Dispatch a `user` invocation.
pub async fn run(ctx: &CommandContext<'_>, command: UserCommand) -> Result<String> {
    let Some(action) = command.action else {
        return Ok(usage());
    };

    match action {
        UserAction::Register { issuer, profile } => {
            users::register(ctx, issuer.issuer.as_deref(), &profile.to_draft()).await
        }
        UserAction::List { issuer } => users::list(ctx, issuer.issuer.as_deref()).await,
        UserAction::Info { id, issuer } => {
            users::info(ctx, issuer.issuer.as_deref(), id.as_deref()).await
        }
        UserAction::Update {
            id,
            issuer,
            profile,
        } => {
            users::update(
                ctx,
                issuer.issuer.as_deref(),
                id.as_deref(),
                &profile.to_draft(),
            )
            .await
        }
        UserAction::Delete { id, issuer } => {
            users::delete(ctx, issuer.issuer.as_deref(), id.as_deref()).await
        }
    }
}

const PROFILE_FLAGS: &str = "[--name | -n <name>] [--given | -g <given name>]\n\t\
[--middle | -m <middle name>] [--family | -f <family name>]\n\t\
[--nickname | -k <nickname>] [--username | -u <preferred username>]\n\t\
[--profile | -p <profile uri>] [--picture <picture uri>]\n\t\
[--website | -w <website uri>] [--email | -e <email>]";

/// Usage summary for the `user` command group.
pub fn usage() -> String {
    [
        "Usage:".to_string(),
        format!("  nvl user:register [--issuer | -i <issuer id>]\n\t{PROFILE_FLAGS}"),
        "  nvl user:list [--issuer | -i <issuer id>]".to_string(),
        "  nvl user:info [<id>] [--issuer | -i <issuer id>]".to_string(),
        format!("  nvl user:update [<id>] [--issuer | -i <issuer id>]\n\t{PROFILE_FLAGS}"),
        "  nvl user:delete [<id>] [--issuer | -i <issuer id>]".to_string(),
    ]
    .join("\n")
}
