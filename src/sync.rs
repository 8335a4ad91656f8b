//! Slash-command synchronization strategy.
//!
//! Guild-scoped pushes propagate near-instantly, which is what you want while
//! iterating on commands. Global pushes are the correct end-state for a
//! released bot but can take up to an hour to show up everywhere.

use crate::config::Environment;
use crate::serenity;

/// How (and whether) to push the command tree to Discord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Push the command set to a single development guild.
    DevGuild(serenity::GuildId),
    /// Push the full global command set.
    Global,
    /// Make no sync call at all.
    Skipped,
}

impl SyncStrategy {
    /// Picks the strategy for the given environment and dev guild.
    ///
    /// The decision lives here, away from the call site, so there is exactly
    /// one place that encodes the branching.
    pub fn decide(environment: Environment, dev_guild: Option<serenity::GuildId>) -> SyncStrategy {
        match (environment, dev_guild) {
            (Environment::Development, Some(guild)) => SyncStrategy::DevGuild(guild),
            (Environment::Production, _) => SyncStrategy::Global,
            (Environment::Development, None) => SyncStrategy::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_with_guild_syncs_to_that_guild() {
        let guild = serenity::GuildId::new(123);
        let strategy = SyncStrategy::decide(Environment::Development, Some(guild));
        assert_eq!(strategy, SyncStrategy::DevGuild(guild));
    }

    #[test]
    fn production_syncs_globally() {
        let strategy = SyncStrategy::decide(Environment::Production, None);
        assert_eq!(strategy, SyncStrategy::Global);
    }

    #[test]
    fn production_ignores_the_dev_guild() {
        let guild = Some(serenity::GuildId::new(123));
        let strategy = SyncStrategy::decide(Environment::Production, guild);
        assert_eq!(strategy, SyncStrategy::Global);
    }

    #[test]
    fn development_without_guild_skips_sync() {
        let strategy = SyncStrategy::decide(Environment::Development, None);
        assert_eq!(strategy, SyncStrategy::Skipped);
    }
}
