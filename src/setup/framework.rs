//! Setup for [poise::Framework].

use crate::cogs;
use crate::db::DbManager;
use crate::events;
use crate::serenity;
use crate::sync::SyncStrategy;
use crate::Config;
use crate::Data;
use crate::YukaError;

/// Convenient type alias, only this [poise::Framework] type is used.
type Framework = poise::Framework<Data, YukaError>;

/// Construct a [poise::Framework].
///
/// Cogs are loaded here, before the gateway connects; their command tree is
/// pushed to Discord in [framework_setup] once authentication succeeds.
pub(super) fn framework(config: Config, db: DbManager) -> Framework {
    let commands = cogs::load_all(&cogs::list(), &db);

    poise::Framework::builder()
        .options(framework_options(commands))
        .setup(move |ctx, rdy, fw| framework_setup(ctx, rdy, fw, config, db))
        .build()
}

/// Configure options for the [Framework].
fn framework_options(commands: Vec<cogs::Command>) -> poise::FrameworkOptions<Data, YukaError> {
    poise::FrameworkOptions {
        commands,
        // Handle framework errors
        on_error: |e| crate::log::handle_framework_error(e),
        // Gateway events outside the command dispatcher
        event_handler: |ctx, event, _fw, data| Box::pin(events::handle(ctx, event, data)),
        // Log when commands start
        pre_command: |ctx| {
            Box::pin(async move {
                let cmd_name = &ctx.command().name;
                let user = &ctx.author();
                tracing::info!("Started '{cmd_name}' command from {user}.")
            })
        },
        // Log when finishing commands
        post_command: |ctx| {
            Box::pin(async move {
                let cmd_name = &ctx.command().name;
                let user = &ctx.author();
                tracing::info!("Finished '{cmd_name}' command from {user}.")
            })
        },
        ..Default::default()
    }
}

/// Construct the future that runs once after the gateway handshake succeeds.
///
/// This is the only place that pushes the command tree to Discord; the
/// branching itself lives in [SyncStrategy::decide]. A failed push propagates
/// out of setup and fails startup.
fn framework_setup<'a>(
    ctx: &'a serenity::Context,
    rdy: &'a serenity::Ready,
    fw: &'a Framework,
    config: Config,
    db: DbManager,
) -> poise::BoxFuture<'a, Result<Data, YukaError>> {
    Box::pin(async move {
        let commands = &fw.options().commands;
        let app_commands = poise::builtins::create_application_commands(commands);

        match SyncStrategy::decide(config.environment(), config.dev_guild()) {
            SyncStrategy::DevGuild(guild) => {
                // Guild-scoped pushes propagate near-instantly.
                tracing::info!("Syncing commands to development guild {guild}.");
                guild.set_commands(ctx, app_commands).await?;
            }
            SyncStrategy::Global => {
                tracing::info!("Syncing global commands, propagation may take up to an hour.");
                serenity::Command::set_global_commands(ctx, app_commands).await?;
            }
            SyncStrategy::Skipped => {
                tracing::info!("Skipping command sync: DEVELOPMENT without DEV_GUILD_ID.");
            }
        }

        let bot_name = &rdy.user.name;
        tracing::info!("{bot_name} is ready, running in {} mode.", config.environment());

        Ok(Data { db })
    })
}
