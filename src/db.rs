//! The shared guild-settings store.
//!
//! Constructed once in `main` and handed to every cog through
//! [Data](crate::Data). The store is a small TOML file, written through on
//! every update; a missing file starts empty, a corrupt file is a startup
//! error.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::DbError;
use crate::serenity;

/// Default location of the store file.
pub const STORE_PATH: &str = "data/guilds.toml";

/// Per-guild settings kept in the store.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildSettings {
    /// Greet new members when they join.
    pub welcome_enabled: bool,
    /// Channel the greeting is sent to.
    pub welcome_channel: Option<serenity::ChannelId>,
}

/// On-disk shape of the store. TOML keys must be strings, so guild ids are
/// stored in decimal form.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Store {
    #[serde(default)]
    guilds: BTreeMap<String, GuildSettings>,
}

/// Handle to the guild-settings store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DbManager {
    /// Where the store is persisted.
    path: PathBuf,
    /// In-memory copy, only ever mutated through [DbManager::update_guild].
    store: Arc<Mutex<Store>>,
}

impl DbManager {
    /// Opens the store at `path`. A file that doesn't exist yet starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<DbManager, DbError> {
        let path = path.into();

        let store = match std::fs::read_to_string(&path) {
            Ok(content) => {
                // If deserialization fails, report exactly where it went wrong.
                let to_toml = toml::Deserializer::new(&content);
                serde_path_to_error::deserialize(to_toml).map_err(|error| DbError::Corrupt {
                    reason: error.to_string(),
                })?
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Store::default(),
            Err(error) => return Err(DbError::Io(error)),
        };

        Ok(DbManager {
            path,
            store: Arc::new(Mutex::new(store)),
        })
    }

    /// Settings for `guild`, defaults if the guild was never seen.
    pub async fn guild_settings(&self, guild: serenity::GuildId) -> GuildSettings {
        let store = self.store.lock().await;
        store
            .guilds
            .get(&guild.to_string())
            .cloned()
            .unwrap_or_default()
    }

    /// Applies `update` to the settings for `guild` and persists the store.
    pub async fn update_guild(
        &self,
        guild: serenity::GuildId,
        update: impl FnOnce(&mut GuildSettings),
    ) -> Result<(), DbError> {
        let mut store = self.store.lock().await;
        let settings = store.guilds.entry(guild.to_string()).or_default();
        update(settings);
        self.persist(&store)
    }

    /// Writes the store back to disk.
    fn persist(&self, store: &Store) -> Result<(), DbError> {
        let content = toml::to_string_pretty(store).expect("store serialization can't fail");
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content).map_err(DbError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("yuka-bot-test-{}-{name}.toml", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let path = temp_store("missing");
        let _ = std::fs::remove_file(&path);

        let db = DbManager::open(&path).unwrap();
        let settings = db.guild_settings(serenity::GuildId::new(1)).await;
        assert!(!settings.welcome_enabled);
        assert_eq!(settings.welcome_channel, None);
    }

    #[tokio::test]
    async fn updates_survive_reopening() {
        let path = temp_store("reopen");
        let _ = std::fs::remove_file(&path);
        let guild = serenity::GuildId::new(123);

        let db = DbManager::open(&path).unwrap();
        db.update_guild(guild, |settings| settings.welcome_enabled = true)
            .await
            .unwrap();

        let reopened = DbManager::open(&path).unwrap();
        assert!(reopened.guild_settings(guild).await.welcome_enabled);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn guilds_are_independent() {
        let path = temp_store("independent");
        let _ = std::fs::remove_file(&path);

        let db = DbManager::open(&path).unwrap();
        db.update_guild(serenity::GuildId::new(1), |settings| {
            settings.welcome_enabled = true
        })
        .await
        .unwrap();

        let other = db.guild_settings(serenity::GuildId::new(2)).await;
        assert!(!other.welcome_enabled);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_store("corrupt");
        std::fs::write(&path, "not [valid } toml").unwrap();

        assert!(matches!(
            DbManager::open(&path),
            Err(DbError::Corrupt { .. })
        ));

        let _ = std::fs::remove_file(&path);
    }
}
