//! Constructs the client with its framework, intents, and collaborators.

mod framework;

use songbird::SerenityInit;

use crate::db::DbManager;
use crate::serenity;
use crate::Config;
use crate::YukaError;

/// Constructs a [serenity::Client] with the framework and [songbird] attached.
///
/// The intents requested here are fixed for the client's lifetime and must
/// match what the Discord application has been granted, otherwise the gateway
/// handshake fails.
pub(crate) async fn client(config: Config, db: DbManager) -> Result<serenity::Client, YukaError> {
    let token = config.token().to_owned();

    // See https://discord.com/developers/docs/topics/gateway#gateway-intents
    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let client = serenity::ClientBuilder::new(token, intents)
        .framework(framework::framework(config, db))
        .register_songbird()
        .await?;

    Ok(client)
}
