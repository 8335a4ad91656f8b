//! The `music` cog: voice-channel plumbing.
//!
//! Joining and leaving calls only; the bot carries the voice-state intent and
//! a registered [songbird] manager for this.

use std::sync::Arc;

use songbird::Call;
use songbird::Songbird;
use tokio::sync::Mutex;
use tracing::instrument;

use super::Cog;
use super::Command;
use crate::db::DbManager;
use crate::error::UserError;
use crate::Context;
use crate::YukaError;

pub(super) fn cog() -> Cog {
    Cog {
        name: "music",
        setup,
    }
}

fn setup(_db: &DbManager) -> Result<Vec<Command>, YukaError> {
    Ok(vec![join(), leave()])
}

/// Joins the voice channel you are currently in.
#[instrument(skip(ctx))]
#[poise::command(slash_command, guild_only)]
pub async fn join(ctx: Context<'_>) -> Result<(), YukaError> {
    join_author(&ctx).await?;
    ctx.reply("Joined your voice channel.").await?;
    Ok(())
}

/// Leaves the current voice channel.
#[instrument(skip(ctx))]
#[poise::command(slash_command, guild_only)]
pub async fn leave(ctx: Context<'_>) -> Result<(), YukaError> {
    let call = current_call(&ctx).await?;
    call.lock().await.leave().await?;

    ctx.reply("Left the voice channel.").await?;
    Ok(())
}

/// Joins the call the command author is in.
async fn join_author(ctx: &Context<'_>) -> Result<Arc<Mutex<Call>>, YukaError> {
    let manager = manager(ctx).await;
    let author = ctx.author();

    // The cache guard must not be held across an await point.
    let (guild_id, voice_states) = {
        let guild = ctx.guild().ok_or(UserError::GuildOnly)?;
        (guild.id, guild.voice_states.clone())
    };

    let channel_id = voice_states
        .get(&author.id)
        .and_then(|state| state.channel_id)
        .ok_or(UserError::NotInVoice)?;

    let call = manager.join(guild_id, channel_id).await?;
    Ok(call)
}

/// The guild's current call, if the bot is in one.
async fn current_call(ctx: &Context<'_>) -> Result<Arc<Mutex<Call>>, YukaError> {
    let guild_id = ctx.guild_id().ok_or(UserError::GuildOnly)?;
    let manager = manager(ctx).await;

    let call = manager.get(guild_id).ok_or(UserError::NoCall)?;
    Ok(call)
}

/// The songbird voice manager registered at client construction.
async fn manager(ctx: &Context<'_>) -> Arc<Songbird> {
    songbird::get(ctx.serenity_context())
        .await
        .expect("songbird registered at client construction")
}
