//! The `general` cog: everyday commands available everywhere.

use tracing::instrument;

use super::Cog;
use super::Command;
use crate::db::DbManager;
use crate::Context;
use crate::YukaError;

pub(super) fn cog() -> Cog {
    Cog {
        name: "general",
        setup,
    }
}

/// The general cog needs no shared state to initialize.
fn setup(_db: &DbManager) -> Result<Vec<Command>, YukaError> {
    Ok(vec![help(), ping()])
}

/// Shows help for the bot's commands.
#[instrument(skip(ctx))]
#[poise::command(slash_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help for"] command: Option<String>,
) -> Result<(), YukaError> {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration::default(),
    )
    .await?;
    Ok(())
}

/// Checks that the bot is alive and reports gateway latency.
#[instrument(skip(ctx))]
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), YukaError> {
    let latency = ctx.ping().await;
    ctx.reply(format!("Pong! Gateway latency: {}ms.", latency.as_millis()))
        .await?;
    Ok(())
}
