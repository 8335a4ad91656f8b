//! Error types for the bot.

use thiserror::Error;

use crate::serenity;

/// Top-level error type. Everything that can go wrong funnels into this.
#[derive(Debug, Error)]
pub enum YukaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// Errors that are the user's to fix, not ours.
    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Serenity(#[from] serenity::Error),

    #[error("Failed to join the voice channel.")]
    Join(#[from] songbird::error::JoinError),

    #[error("Login failed. Check that BOT_TOKEN is correct and valid.")]
    InvalidToken,

    #[error("Command panicked: {payload:?}")]
    Panic { payload: Option<String> },
}

/// Errors while reading the environment configuration.
/// All of these halt startup before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN is not set. The bot cannot run without it.")]
    MissingToken,

    #[error("Invalid value '{value}' for {name}: {reason}.")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors shown to users as ephemeral replies.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("This command only works in a server.")]
    GuildOnly,

    #[error("You are not in a voice channel.")]
    NotInVoice,

    #[error("I'm not in a voice channel.")]
    NoCall,

    #[error("Could not parse arguments: {input:?}.")]
    BadArgs { input: Option<String> },

    #[error("This command is on cooldown. Try again in {} second(s).", .remaining.as_secs())]
    OnCooldown { remaining: std::time::Duration },

    #[error("I'm missing permissions I need for this: {missing}.")]
    MissingBotPermissions { missing: serenity::Permissions },

    #[error("You don't have permission to use this command.")]
    MissingUserPermissions,

    #[error("Only the bot owner can use this command.")]
    NotOwner,

    #[error("This command needs one of these subcommands: {subcmds}.")]
    MissingSubcommand { subcmds: String },
}

/// Errors from the guild-settings store.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Could not access the guild store: {0}")]
    Io(#[from] std::io::Error),

    #[error("The guild store is corrupt: {reason}")]
    Corrupt { reason: String },
}
