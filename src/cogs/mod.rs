//! Bot command modules ("cogs").
//!
//! Each cog exposes a registration entry point that receives the shared
//! [DbManager] and returns the commands it contributes. Loading is
//! best-effort: a cog that fails to initialize is logged and skipped, since a
//! bot with a reduced command surface beats no bot at all.

mod admin;
mod general;
mod music;

use crate::db::DbManager;
use crate::Data;
use crate::YukaError;

/// Convenient type alias for [poise::Command].
pub type Command = poise::Command<Data, YukaError>;

/// A named command module.
pub struct Cog {
    /// Name used in load diagnostics.
    pub name: &'static str,
    /// Registration entry point, receives the shared database handle.
    pub setup: fn(&DbManager) -> Result<Vec<Command>, YukaError>,
}

/// The fixed, ordered list of cogs this bot loads.
pub fn list() -> Vec<Cog> {
    vec![general::cog(), admin::cog(), music::cog()]
}

/// Loads every cog in order, skipping (and logging) the ones that fail.
pub fn load_all(cogs: &[Cog], db: &DbManager) -> Vec<Command> {
    let mut commands = Vec::new();

    for cog in cogs {
        match (cog.setup)(db) {
            Ok(loaded) => {
                tracing::info!("Loaded '{}' cog with {} command(s).", cog.name, loaded.len());
                commands.extend(loaded);
            }
            Err(error) => tracing::error!("Failed to load '{}' cog: {error}", cog.name),
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    fn test_db() -> DbManager {
        let path = std::env::temp_dir().join(format!("yuka-cogs-test-{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);
        DbManager::open(path).unwrap()
    }

    #[test]
    fn cogs_are_listed_in_fixed_order() {
        let names: Vec<_> = list().iter().map(|cog| cog.name).collect();
        assert_eq!(names, ["general", "admin", "music"]);
    }

    #[test]
    fn every_cog_loads_with_a_fresh_store() {
        let commands = load_all(&list(), &test_db());

        let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["help", "ping", "settings", "join", "leave"]);
    }

    #[test]
    fn a_failing_cog_does_not_stop_the_rest() {
        fn broken(_: &DbManager) -> Result<Vec<Command>, YukaError> {
            Err(DbError::Corrupt {
                reason: "store unreadable".to_string(),
            }
            .into())
        }

        let cogs = vec![
            Cog {
                name: "general",
                setup: |_| Ok(vec![super::general::ping()]),
            },
            Cog {
                name: "admin",
                setup: broken,
            },
            Cog {
                name: "music",
                setup: |_| Ok(vec![super::music::join()]),
            },
        ];

        let commands = load_all(&cogs, &test_db());
        let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["ping", "join"]);
    }
}
