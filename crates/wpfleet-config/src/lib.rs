//! Shared configuration for the wpfleet CLI.
//!
//! TOML profiles plus `WPFLEET_*` environment overrides (layered with
//! figment), and API-key resolution. Credentials come from the
//! environment or the profile file — there is deliberately no vault
//! integration; the API key is passed through to the vendor as-is.

use std::collections::HashMap;
use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable consulted first for the API key.
pub const API_KEY_ENV: &str = "WPFLEET_API_KEY";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoApiKey { profile: String },

    #[error("no company configured for profile '{profile}'")]
    NoCompany { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Operation poll interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    5
}

/// A named account profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Vendor API base URL. Falls back to the production endpoint.
    pub api_url: Option<String>,

    /// Company (account) identifier the fleet belongs to.
    pub company: Option<String>,

    /// API key (plaintext — prefer `api_key_env` or the env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
}

// ── Paths & loading ─────────────────────────────────────────────────

/// Location of the config file (`wpfleet.toml` in the platform config dir).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "wpfleet", "wpfleet").map_or_else(
        || PathBuf::from("wpfleet.toml"),
        |dirs| dirs.config_dir().join("wpfleet.toml"),
    )
}

/// Load the layered configuration: defaults < TOML file < `WPFLEET_*` env.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("WPFLEET_").split("__"));
    Ok(figment.extract()?)
}

/// Load the configuration, falling back to defaults if anything is
/// malformed. Used by commands that must not fail on a bad file.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Persist the configuration back to the TOML file.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let rendered = toml::to_string_pretty(config)?;
    std::fs::write(&path, rendered)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key for a profile.
///
/// Order: `WPFLEET_API_KEY` env var, then the env var the profile
/// names in `api_key_env`, then the plaintext profile value.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_api_key_from(profile, profile_name, |var| std::env::var(var).ok())
}

// The env lookup is injected so resolution order can be tested without
// mutating the process environment.
fn resolve_api_key_from(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    if let Some(key) = env(API_KEY_ENV).filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key));
    }

    if let Some(ref var) = profile.api_key_env {
        if let Some(key) = env(var).filter(|k| !k.is_empty()) {
            return Ok(SecretString::from(key));
        }
    }

    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoApiKey {
        profile: profile_name.to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_default_profile() {
        let config = Config::default();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert!(config.profiles.is_empty());
        assert_eq!(config.defaults.poll_interval, 5);
    }

    #[test]
    fn global_env_var_wins_over_profile_sources() {
        use secrecy::ExposeSecret;
        let profile = Profile {
            api_key: Some("plain-key".into()),
            api_key_env: Some("ACME_KEY".into()),
            ..Profile::default()
        };
        let env = |var: &str| match var {
            API_KEY_ENV => Some("global-key".to_owned()),
            "ACME_KEY" => Some("profile-env-key".to_owned()),
            _ => None,
        };

        let key = resolve_api_key_from(&profile, "default", env).expect("key should resolve");
        assert_eq!(key.expose_secret(), "global-key");
    }

    #[test]
    fn profile_named_env_var_wins_over_plaintext() {
        use secrecy::ExposeSecret;
        let profile = Profile {
            api_key: Some("plain-key".into()),
            api_key_env: Some("ACME_KEY".into()),
            ..Profile::default()
        };
        let env = |var: &str| (var == "ACME_KEY").then(|| "profile-env-key".to_owned());

        let key = resolve_api_key_from(&profile, "default", env).expect("key should resolve");
        assert_eq!(key.expose_secret(), "profile-env-key");
    }

    #[test]
    fn plaintext_api_key_resolves_last() {
        use secrecy::ExposeSecret;
        let profile = Profile {
            api_key: Some("plain-key".into()),
            ..Profile::default()
        };

        let key = resolve_api_key_from(&profile, "default", |_| None)
            .expect("plaintext key should resolve");
        assert_eq!(key.expose_secret(), "plain-key");
    }

    #[test]
    fn empty_env_values_are_skipped() {
        use secrecy::ExposeSecret;
        let profile = Profile {
            api_key: Some("plain-key".into()),
            ..Profile::default()
        };

        let key = resolve_api_key_from(&profile, "default", |_| Some(String::new()))
            .expect("empty env value should fall through");
        assert_eq!(key.expose_secret(), "plain-key");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let profile = Profile::default();
        let err = resolve_api_key_from(&profile, "prod", |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::NoApiKey { ref profile } if profile == "prod"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.profiles.insert(
            "prod".into(),
            Profile {
                api_url: Some("https://api.example.test/v2".into()),
                company: Some("acme-co".into()),
                api_key_env: Some("ACME_FLEET_KEY".into()),
                ..Profile::default()
            },
        );

        let rendered = toml::to_string_pretty(&config).expect("config should serialize");
        let parsed: Config = toml::from_str(&rendered).expect("config should parse back");

        let prod = &parsed.profiles["prod"];
        assert_eq!(prod.company.as_deref(), Some("acme-co"));
        assert_eq!(prod.api_key_env.as_deref(), Some("ACME_FLEET_KEY"));
    }
}
