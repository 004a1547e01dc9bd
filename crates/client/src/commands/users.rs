//! Handlers for the `user` command group.

use nvl_core::prompt::{register_fields, update_fields};
use nvl_core::UserDraft;

use super::CommandContext;
use crate::error::Result;
use crate::output::{format_user, format_users};
use crate::prompt::collect_answers;

/// Register a user from prompted (or supplied) attributes.
pub async fn register(
    ctx: &CommandContext<'_>,
    issuer: Option<&str>,
    supplied: &UserDraft,
) -> Result<String> {
    let mut client = ctx.connect(issuer)?;
    let discovery = client.discover().await?;

    let answers = collect_answers(ctx.prompter, &register_fields(supplied))?;
    let user = client.create_user(&answers, &discovery.token).await?;
    tracing::info!(id = user.id_str(), "registered user");

    Ok(format_user(&user, ctx.format))
}

/// List every user as a table.
pub async fn list(ctx: &CommandContext<'_>, issuer: Option<&str>) -> Result<String> {
    let mut client = ctx.connect(issuer)?;
    let discovery = client.discover().await?;

    let users = client.list_users(&discovery.token).await?;
    tracing::debug!(count = users.len(), "fetched users");

    Ok(format_users(&users, ctx.format))
}

/// Show one user.
pub async fn info(
    ctx: &CommandContext<'_>,
    issuer: Option<&str>,
    id: Option<&str>,
) -> Result<String> {
    let mut client = ctx.connect(issuer)?;
    let discovery = client.discover().await?;

    let id = ctx
        .resolve_user_id(client.as_ref(), &discovery.token, id)
        .await?;
    let user = client.get_user(&id, &discovery.token).await?;

    Ok(format_user(&user, ctx.format))
}

/// Update a user, prompting with the current values as defaults.
pub async fn update(
    ctx: &CommandContext<'_>,
    issuer: Option<&str>,
    id: Option<&str>,
    supplied: &UserDraft,
) -> Result<String> {
    let mut client = ctx.connect(issuer)?;
    let discovery = client.discover().await?;

    let id = ctx
        .resolve_user_id(client.as_ref(), &discovery.token, id)
        .await?;
    let current = client.get_user(&id, &discovery.token).await?;

    let changes = collect_answers(ctx.prompter, &update_fields(supplied, &current))?;
    let user = client.update_user(&id, &changes, &discovery.token).await?;
    tracing::info!(id = %id, "updated user");

    Ok(format_user(&user, ctx.format))
}

/// Delete a user. Prints nothing on success.
pub async fn delete(
    ctx: &CommandContext<'_>,
    issuer: Option<&str>,
    id: Option<&str>,
) -> Result<String> {
    let mut client = ctx.connect(issuer)?;
    let discovery = client.discover().await?;

    let id = ctx
        .resolve_user_id(client.as_ref(), &discovery.token, id)
        .await?;
    client.delete_user(&id, &discovery.token).await?;
    tracing::info!(id = %id, "deleted user");

    Ok(String::new())
}
