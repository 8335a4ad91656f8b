//! Bootstrap entry point for the Yuka bot.
//!
//! Reads configuration from the environment, constructs the client with its
//! fixed intent set, loads the cogs, syncs slash commands with Discord, and
//! runs the gateway loop until the process is terminated.

pub(crate) use poise::serenity_prelude as serenity;

mod cogs;
mod config;
mod data;
mod db;
mod error;
mod events;
mod log;
mod setup;
mod sync;

pub(crate) use config::Config;
pub(crate) use data::Data;
pub(crate) use error::YukaError;

/// Convenient type alias, only this [poise::Context] type is used.
pub(crate) type Context<'a> = poise::Context<'a, Data, YukaError>;

#[tokio::main]
async fn main() {
    // A `.env` file is optional, deployments may set the process environment
    // directly.
    let _ = dotenvy::dotenv();

    // Missing or malformed settings are fatal before any connection is
    // attempted. Tracing is not installed yet, so report on stderr.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("ERROR: {error}");
            std::process::exit(1);
        }
    };

    // The guard must live as long as the process so file logs get flushed.
    let _guard = log::install_tracing(&config);

    if let Err(error) = run(config).await {
        tracing::error!("{error}");
        std::process::exit(1);
    }
}

/// Builds the shared collaborators and blocks on the gateway loop.
async fn run(config: Config) -> Result<(), YukaError> {
    // One store handle for the whole process, every cog receives it.
    let db = db::DbManager::open(db::STORE_PATH)?;

    let mut client = setup::client(config, db).await?;

    match client.start().await {
        // A rejected token surfaces here, after the connection attempt.
        Err(serenity::Error::Gateway(serenity::GatewayError::InvalidAuthentication)) => {
            Err(YukaError::InvalidToken)
        }
        result => Ok(result?),
    }
}
