//! CLI configuration — thin wrapper around `wpfleet_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--company, --api-key, etc.).

use std::time::Duration;

use secrecy::SecretString;

use wpfleet_api::TransportConfig;
use wpfleet_core::PollPolicy;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use wpfleet_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── Resolved session settings ───────────────────────────────────────

/// Everything a command needs to talk to the hosting API.
pub struct Session {
    pub api_url: String,
    pub company: String,
    pub api_key: SecretString,
    pub transport: TransportConfig,
    pub poll: PollPolicy,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate a `Profile` + global flags into a `Session`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_session(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<Session, CliError> {
    // 1. API base URL (flag > profile > built-in)
    let api_url = global
        .api_url
        .as_deref()
        .or(profile.api_url.as_deref())
        .unwrap_or(wpfleet_api::DEFAULT_BASE_URL);
    let parsed: url::Url = api_url.parse().map_err(|_| CliError::Validation {
        field: "api-url".into(),
        reason: format!("invalid URL: {api_url}"),
    })?;
    if parsed.cannot_be_a_base() {
        return Err(CliError::Validation {
            field: "api-url".into(),
            reason: format!("not a base URL: {api_url}"),
        });
    }

    // 2. Company identifier (flag > profile)
    let company = global
        .company
        .clone()
        .or_else(|| profile.company.clone())
        .ok_or(CliError::NoCompany)?;

    // 3. API key (flag > env > key-env var > profile plaintext)
    let api_key = resolve_api_key_with_flag(profile, profile_name, global)?;

    // 4. Request timeout (flag > profile defaults)
    let timeout = Duration::from_secs(global.timeout.unwrap_or(defaults.timeout));

    // 5. Poll cadence (flag > profile defaults)
    let interval = Duration::from_secs(global.poll_interval.unwrap_or(defaults.poll_interval));
    let poll = PollPolicy {
        interval,
        max_polls: global.max_polls,
    };

    Ok(Session {
        api_url: api_url.to_string(),
        company,
        api_key,
        transport: TransportConfig { timeout },
        poll,
    })
}

/// Resolve API key with CLI flag override, then fall through to shared resolution.
fn resolve_api_key_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    // CLI flag takes priority
    if let Some(ref key) = global.api_key {
        return Ok(SecretString::from(key.clone()));
    }
    wpfleet_config::resolve_api_key(profile, profile_name).map_err(|err| match err {
        wpfleet_config::ConfigError::NoApiKey { profile } => CliError::NoApiKey { profile },
        other => CliError::Config(other),
    })
}
