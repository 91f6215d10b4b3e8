//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wpfleet_core::CoreError;

/// Exit codes used by the binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the fleet API")]
    #[diagnostic(
        code(wpfleet::connection_failed),
        help(
            "Check your network and the configured API URL.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(wpfleet::auth_failed),
        help(
            "Verify your API key.\n\
             Set WPFLEET_API_KEY, pass --api-key, or configure the profile:\n\
             wpfleet config init --company <id>"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(wpfleet::no_api_key),
        help(
            "Set the WPFLEET_API_KEY environment variable, or run:\n\
             wpfleet config init --company <id> --api-key-env <VAR>"
        )
    )]
    NoApiKey { profile: String },

    #[error("No company configured")]
    #[diagnostic(
        code(wpfleet::no_company),
        help(
            "Pass --company, set WPFLEET_COMPANY, or configure a profile with:\n\
             wpfleet config init --company <id>"
        )
    )]
    NoCompany,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(wpfleet::not_found),
        help("Run: wpfleet {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Input ────────────────────────────────────────────────────────

    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(wpfleet::validation))]
    Validation { field: String, reason: String },

    // ── Wrapped layers ───────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(code(wpfleet::api))]
    Core(String),

    #[error(transparent)]
    #[diagnostic(code(wpfleet::config))]
    Config(#[from] wpfleet_config::ConfigError),

    #[error(transparent)]
    #[diagnostic(code(wpfleet::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoApiKey { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoCompany => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::ConnectionFailed { reason } => Self::ConnectionFailed { reason },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                resource_type: entity_type,
                identifier,
                list_command: "plugins".into(),
            },
            other => Self::Core(other.to_string()),
        }
    }
}
