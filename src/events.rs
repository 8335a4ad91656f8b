//! Gateway event handling outside the command dispatcher.

use crate::serenity;
use crate::serenity::Mentionable;
use crate::Data;
use crate::YukaError;

/// What the bot reports itself as listening to.
const PRESENCE: &str = "/help";

/// The activity set every time the gateway reports ready.
pub(crate) fn presence() -> serenity::ActivityData {
    serenity::ActivityData::listening(PRESENCE)
}

/// Dispatches the gateway events the bot cares about.
pub(crate) async fn handle(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), YukaError> {
    match event {
        // Fires on every (re)connect, so the presence survives reconnects.
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!("Logged in as {}.", data_about_bot.user.name);
            ctx.set_activity(Some(presence()));
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            greet(ctx, data, new_member).await?;
        }
        _ => {}
    }

    Ok(())
}

/// Greets a new member if their guild has welcome messages configured.
async fn greet(
    ctx: &serenity::Context,
    data: &Data,
    member: &serenity::Member,
) -> Result<(), YukaError> {
    let settings = data.db.guild_settings(member.guild_id).await;
    if !settings.welcome_enabled {
        return Ok(());
    }
    let Some(channel) = settings.welcome_channel else {
        return Ok(());
    };

    channel
        .say(ctx, format!("Welcome to the server, {}!", member.mention()))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_is_stable_across_reconnects() {
        let first = presence();
        let second = presence();

        assert_eq!(first.name, second.name);
        assert_eq!(first.kind, second.kind);
        assert_eq!(first.name, "/help");
        assert_eq!(first.kind, serenity::ActivityType::Listening);
    }
}
