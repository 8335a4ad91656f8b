//! The `admin` cog: guild management commands.
//!
//! Everything here is guild-only and gated on the Manage Server permission.

use tracing::instrument;

use super::Cog;
use super::Command;
use crate::db::DbManager;
use crate::error::UserError;
use crate::serenity;
use crate::Context;
use crate::YukaError;

pub(super) fn cog() -> Cog {
    Cog {
        name: "admin",
        setup,
    }
}

fn setup(_db: &DbManager) -> Result<Vec<Command>, YukaError> {
    Ok(vec![settings()])
}

/// Inspect or change this server's settings.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    subcommands("show", "welcome", "channel")
)]
pub async fn settings(_ctx: Context<'_>) -> Result<(), YukaError> {
    // Discord only ever invokes the subcommands.
    Ok(())
}

/// Shows the current settings for this server.
#[instrument(skip(ctx))]
#[poise::command(slash_command)]
async fn show(ctx: Context<'_>) -> Result<(), YukaError> {
    let guild = ctx.guild_id().ok_or(UserError::GuildOnly)?;
    let settings = ctx.data().db.guild_settings(guild).await;

    let welcome = if settings.welcome_enabled {
        "enabled"
    } else {
        "disabled"
    };
    let channel = settings
        .welcome_channel
        .map_or("not set".to_string(), |id| format!("<#{id}>"));

    ctx.reply(format!(
        "Welcome messages: {welcome}\nWelcome channel: {channel}"
    ))
    .await?;
    Ok(())
}

/// Enables or disables welcome messages for new members.
#[instrument(skip(ctx))]
#[poise::command(slash_command)]
async fn welcome(
    ctx: Context<'_>,
    #[description = "Greet new members?"] enabled: bool,
) -> Result<(), YukaError> {
    let guild = ctx.guild_id().ok_or(UserError::GuildOnly)?;
    ctx.data()
        .db
        .update_guild(guild, |settings| settings.welcome_enabled = enabled)
        .await?;

    let state = if enabled { "enabled" } else { "disabled" };
    ctx.reply(format!("Welcome messages {state}.")).await?;
    Ok(())
}

/// Sets the channel welcome messages are sent to.
#[instrument(skip(ctx, channel))]
#[poise::command(slash_command)]
async fn channel(
    ctx: Context<'_>,
    #[description = "Channel to greet new members in"] channel: serenity::GuildChannel,
) -> Result<(), YukaError> {
    let guild = ctx.guild_id().ok_or(UserError::GuildOnly)?;
    let channel_id = channel.id;

    ctx.data()
        .db
        .update_guild(guild, |settings| {
            settings.welcome_channel = Some(channel_id)
        })
        .await?;

    ctx.reply(format!("Welcome channel set to <#{channel_id}>."))
        .await?;
    Ok(())
}
