//! Configuration for running this bot, read once from the process environment.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::serenity;

/// Environment variable holding the bot token.
const TOKEN_VAR: &str = "BOT_TOKEN";
/// Environment variable holding the optional development guild id.
const DEV_GUILD_VAR: &str = "DEV_GUILD_ID";
/// Environment variable selecting the deployment environment.
const ENVIRONMENT_VAR: &str = "ENVIRONMENT";
/// Environment variable enabling debug traces on the console.
const CONSOLE_DEBUG_VAR: &str = "CONSOLE_DEBUG";
/// Environment variable enabling file logs.
const LOGS_ENABLED_VAR: &str = "LOGS_ENABLED";
/// Environment variable selecting the file log directory.
const LOG_DIR_VAR: &str = "LOG_DIR";

/// Settings read at startup that modify bot behavior. Immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token needed to use a bot account.
    token: String,

    /// Optional guild to update commands quickly during development.
    dev_guild: Option<serenity::GuildId>,

    /// Deployment environment, selects the command-sync strategy.
    environment: Environment,

    /// Print debug traces to console?
    console_debug: bool,
    /// Enable writing to log files?
    logs_enabled: bool,
    /// Directory to store log files.
    log_dir: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `var`. Tests inject their own lookup.
    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        // Empty values behave as unset throughout.
        let var = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        let token = var(TOKEN_VAR).ok_or(ConfigError::MissingToken)?;

        let dev_guild = match var(DEV_GUILD_VAR) {
            None => None,
            Some(raw) => Some(parse_guild_id(&raw)?),
        };

        let environment = match var(ENVIRONMENT_VAR) {
            None => Environment::default(),
            Some(raw) => raw.parse()?,
        };

        let console_debug = var(CONSOLE_DEBUG_VAR).is_some_and(|value| truthy(&value));
        let logs_enabled = var(LOGS_ENABLED_VAR).map_or(true, |value| truthy(&value));
        let log_dir = var(LOG_DIR_VAR).unwrap_or_else(|| "logs".to_string());

        Ok(Config {
            token,
            dev_guild,
            environment,
            console_debug,
            logs_enabled,
            log_dir,
        })
    }

    /// The bot account token.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn dev_guild(&self) -> Option<serenity::GuildId> {
        self.dev_guild
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Is debug mode enabled for console logs.
    pub fn console_debug(&self) -> bool {
        self.console_debug
    }

    /// Is file logging enabled.
    pub fn logs_enabled(&self) -> bool {
        self.logs_enabled
    }

    /// Getter for log_dir.
    pub fn log_dir(&self) -> &str {
        &self.log_dir
    }
}

/// Parses a guild id, rejecting anything that is not a nonzero u64.
fn parse_guild_id(raw: &str) -> Result<serenity::GuildId, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidVar {
        name: DEV_GUILD_VAR,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let id: u64 = raw.trim().parse().map_err(|_| invalid("not a u64"))?;
    if id == 0 {
        return Err(invalid("guild ids are nonzero"));
    }
    Ok(serenity::GuildId::new(id))
}

/// Interprets common spellings of a boolean environment value.
fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Deployment environment the bot runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    /// Case-insensitive. Anything else is a configuration mistake.
    fn from_str(raw: &str) -> Result<Environment, ConfigError> {
        match raw.trim().to_uppercase().as_str() {
            "DEVELOPMENT" => Ok(Environment::Development),
            "PRODUCTION" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidVar {
                name: ENVIRONMENT_VAR,
                value: raw.to_string(),
                reason: "expected DEVELOPMENT or PRODUCTION".to_string(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "DEVELOPMENT"),
            Environment::Production => write!(f, "PRODUCTION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn missing_token_is_fatal() {
        let error = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(error, ConfigError::MissingToken));
    }

    #[test]
    fn empty_token_is_fatal() {
        let error = Config::from_lookup(lookup(&[("BOT_TOKEN", "")])).unwrap_err();
        assert!(matches!(error, ConfigError::MissingToken));
    }

    #[test]
    fn environment_defaults_to_production() {
        let config = Config::from_lookup(lookup(&[("BOT_TOKEN", "abc")])).unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.dev_guild(), None);
    }

    #[test]
    fn environment_is_normalized_to_uppercase() {
        let config =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "abc"), ("ENVIRONMENT", "development")]))
                .unwrap();
        assert_eq!(config.environment(), Environment::Development);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let error =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "abc"), ("ENVIRONMENT", "STAGING")]))
                .unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidVar {
                name: "ENVIRONMENT",
                ..
            }
        ));
    }

    #[test]
    fn dev_guild_is_parsed() {
        let config =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "abc"), ("DEV_GUILD_ID", "123")])).unwrap();
        assert_eq!(config.dev_guild(), Some(serenity::GuildId::new(123)));
    }

    #[test]
    fn empty_dev_guild_behaves_as_unset() {
        let config =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "abc"), ("DEV_GUILD_ID", "")])).unwrap();
        assert_eq!(config.dev_guild(), None);
    }

    #[test]
    fn malformed_dev_guild_is_rejected() {
        let error = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "abc"),
            ("DEV_GUILD_ID", "not-a-number"),
        ]))
        .unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidVar {
                name: "DEV_GUILD_ID",
                ..
            }
        ));
    }
}
