// ── Domain types for the fleet view ──

use serde::{Deserialize, Serialize};

use wpfleet_api::types::PluginRecord;

/// Marker the vendor uses in a plugin record's `update` field when a
/// newer version is available.
pub const UPDATE_AVAILABLE: &str = "available";

/// One fleet member with its resolved environments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    /// Human-friendly display name.
    pub name: String,
    /// `environments[0]` is treated as the canonical environment.
    pub environments: Vec<Environment>,
}

/// A deployable instance of a site; only the id is ever addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
}

/// One row of a resolution cycle: a site's canonical environment and
/// its full installed-plugin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitePlugins {
    pub env_id: String,
    pub site_name: String,
    pub plugins: Vec<PluginRecord>,
}

/// Filter projection: the slice of a site's plugin data relevant to
/// the currently selected plugin. Produced only for sites that run it,
/// discarded and fully rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteWithPlugin {
    pub env_id: String,
    pub name: String,
    pub version: Option<String>,
    pub status: Option<String>,
    pub update_available: Option<String>,
    pub update_version: Option<String>,
}

impl SiteWithPlugin {
    /// Whether the vendor advertises an update for this site's copy.
    pub fn is_updatable(&self) -> bool {
        self.update_available.as_deref() == Some(UPDATE_AVAILABLE)
    }
}
