//! Layered configuration.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use gatekeep_cache::CacheConfig;
use gatekeep_core::UserId;
use gatekeep_error::{ConfigError, GatekeepError, GatekeepResult};
use gatekeep_guard::DeveloperSet;
use gatekeep_security::ChallengeStore;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument, warn};

/// Legacy environment variable holding space-separated developer ids.
pub const DEVS_VAR: &str = "DEVS";

/// Cache sizing and the developer allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GatekeepConfig {
    /// Membership cache settings
    #[serde(default)]
    member_cache: CacheConfig,

    /// Challenge store settings
    #[serde(
        default = "ChallengeStore::default_config",
        deserialize_with = "challenge_config"
    )]
    challenges: CacheConfig,

    /// Developer user ids
    #[serde(default)]
    developers: Vec<UserId>,
}

impl Default for GatekeepConfig {
    fn default() -> Self {
        Self {
            member_cache: CacheConfig::default(),
            challenges: ChallengeStore::default_config(),
            developers: Vec::new(),
        }
    }
}

impl GatekeepConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> GatekeepResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                GatekeepError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                GatekeepError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence, later sources overriding earlier:
    /// 1. Bundled defaults (gatekeep.toml shipped with the crate)
    /// 2. User config in home directory (~/.config/gatekeep/gatekeep.toml)
    /// 3. User config in current directory (./gatekeep.toml)
    /// 4. `GATEKEEP_` environment variables, `__` separating nested keys
    ///    (`GATEKEEP_MEMBER_CACHE__TTL_SECS=600`); `GATEKEEP_DEVELOPERS`
    ///    takes space-separated ids
    ///
    /// A `.env` file is read first if present. Ids in the legacy `DEVS`
    /// variable are then added to the developer list.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gatekeep::GatekeepConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = GatekeepConfig::load()?;
    /// println!("{} developers", config.developers().len());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> GatekeepResult<Self> {
        let _ = dotenvy::dotenv();
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../gatekeep.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config/gatekeep/gatekeep.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("gatekeep").required(false))
            .add_source(environment());

        let config: Self = builder
            .build()
            .map_err(|e| {
                GatekeepError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                GatekeepError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        Ok(match std::env::var(DEVS_VAR) {
            Ok(raw) => config.with_legacy_developers(&raw),
            Err(_) => config,
        })
    }

    /// Merge a legacy space-separated developer list.
    ///
    /// All-or-nothing: if any entry is not an integer id the whole list is
    /// ignored with a warning.
    pub fn with_legacy_developers(mut self, raw: &str) -> Self {
        match parse_developer_ids(raw) {
            Ok(ids) => {
                for id in ids {
                    if !self.developers.contains(&id) {
                        self.developers.push(id);
                    }
                }
            }
            Err(bad) => {
                warn!(entry = %bad, var = DEVS_VAR, "Ignoring developer list with invalid id");
            }
        }
        self
    }

    /// Freeze the developer list into an allowlist.
    pub fn developer_set(&self) -> DeveloperSet {
        self.developers.iter().copied().collect()
    }
}

/// Challenge settings present in a source; the rest fall back to the
/// challenge store's defaults rather than the member cache's.
#[derive(Deserialize)]
struct ChallengeOverrides {
    ttl_secs: Option<u64>,
    capacity: Option<usize>,
}

fn challenge_config<'de, D>(deserializer: D) -> Result<CacheConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = ChallengeOverrides::deserialize(deserializer)?;
    let mut config = ChallengeStore::default_config();
    if let Some(ttl_secs) = overrides.ttl_secs {
        config = config.with_ttl_secs(ttl_secs);
    }
    if let Some(capacity) = overrides.capacity {
        config = config.with_capacity(capacity);
    }
    Ok(config)
}

/// `GATEKEEP_` variables, values kept as strings until deserialised so a
/// single developer id still reads as a one-element list.
fn environment() -> Environment {
    Environment::with_prefix("GATEKEEP")
        .prefix_separator("_")
        .separator("__")
        .list_separator(" ")
        .with_list_parse_key("developers")
}

/// Parse space-separated ids, returning the first bad entry on failure.
fn parse_developer_ids(raw: &str) -> Result<Vec<UserId>, String> {
    raw.split_whitespace()
        .map(|entry| {
            entry
                .parse::<i64>()
                .map(UserId)
                .map_err(|_| entry.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_match_code_defaults() {
        let bundled: GatekeepConfig = Config::builder()
            .add_source(File::from_str(
                include_str!("../gatekeep.toml"),
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(bundled, GatekeepConfig::default());
    }

    fn from_vars(vars: &[(&str, &str)]) -> GatekeepConfig {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_env_developer_list() {
        let config = from_vars(&[("GATEKEEP_DEVELOPERS", "11 22")]);
        assert_eq!(config.developers(), &vec![UserId(11), UserId(22)]);

        let config = from_vars(&[("GATEKEEP_DEVELOPERS", "7")]);
        assert_eq!(config.developers(), &vec![UserId(7)]);
    }

    #[test]
    fn test_env_nested_cache_settings() {
        let config = from_vars(&[
            ("GATEKEEP_MEMBER_CACHE__TTL_SECS", "60"),
            ("GATEKEEP_CHALLENGES__CAPACITY", "16"),
        ]);
        assert_eq!(*config.member_cache().ttl_secs(), 60);
        assert_eq!(*config.member_cache().capacity(), 512);
        assert_eq!(*config.challenges().capacity(), 16);
        assert_eq!(*config.challenges().ttl_secs(), 40);
    }

    #[test]
    fn test_legacy_developers_merged() {
        let config = GatekeepConfig::default().with_legacy_developers(" 11  22 11 ");
        assert_eq!(config.developers(), &vec![UserId(11), UserId(22)]);
        assert!(config.developer_set().contains(UserId(22)));
    }

    #[test]
    fn test_invalid_legacy_developers_ignored() {
        let config = GatekeepConfig {
            developers: vec![UserId(5)],
            ..Default::default()
        }
        .with_legacy_developers("11 bob 22");
        assert_eq!(config.developers(), &vec![UserId(5)]);
    }

    #[test]
    fn test_empty_legacy_developers() {
        let config = GatekeepConfig::default().with_legacy_developers("");
        assert!(config.developers().is_empty());
    }
}
