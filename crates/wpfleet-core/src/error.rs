// ── Core error types ──
//
// User-facing errors from wpfleet-core. Consumers never see raw HTTP
// status codes or JSON parse failures directly; the
// `From<wpfleet_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Cannot reach the fleet API: {reason}")]
    ConnectionFailed { reason: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wpfleet_api::Error> for CoreError {
    fn from(err: wpfleet_api::Error) -> Self {
        match err {
            wpfleet_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            wpfleet_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            wpfleet_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            wpfleet_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid API URL: {e}"),
            },
            wpfleet_api::Error::Api { status: 404, message } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            wpfleet_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            wpfleet_api::Error::Deserialization { message, .. } => CoreError::Api {
                message: format!("unexpected response shape: {message}"),
                status: None,
            },
        }
    }
}
