// wpfleet-api: Async Rust client for the hosting fleet-management API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::FleetClient;
pub use error::Error;
pub use transport::TransportConfig;

/// Default production base URL for the vendor API.
pub const DEFAULT_BASE_URL: &str = "https://api.kinsta.com/v2";
