//! Response types for the hosting fleet-management API.
//!
//! The vendor wraps every resource in a named envelope (`company`,
//! `site`, `environment`), and field names are snake_case on the wire,
//! so the structs here mirror the JSON one-to-one. Unknown fields are
//! ignored throughout — the vendor adds fields without versioning.

use serde::{Deserialize, Serialize};

/// Body `status` value meaning an update request was accepted.
pub const STATUS_ACCEPTED: u16 = 202;

/// Body `status` value meaning an operation has finished.
pub const STATUS_FINISHED: u16 = 200;

// ── Sites ────────────────────────────────────────────────────────────

/// Envelope for `GET /sites?company={id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesEnvelope {
    pub company: CompanySites,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySites {
    pub sites: Vec<SiteSummary>,
}

/// One fleet member as listed by the company sites endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSummary {
    pub id: String,
    /// Internal reference name (e.g. "mysite").
    pub name: String,
    /// Human-friendly name shown to operators.
    pub display_name: String,
    pub status: Option<String>,
}

// ── Environments ─────────────────────────────────────────────────────

/// Envelope for `GET /sites/{siteId}/environments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentsEnvelope {
    pub site: SiteEnvironments,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEnvironments {
    pub environments: Vec<EnvironmentSummary>,
}

/// A deployable instance of a site. Only the id is ever addressed;
/// the rest is carried for display/debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentSummary {
    pub id: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
}

// ── Plugins ──────────────────────────────────────────────────────────

/// Envelope for `GET /sites/environments/{envId}/plugins`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginsEnvelope {
    pub environment: EnvironmentPlugins,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentPlugins {
    pub container_info: ContainerInfo,
}

/// Container info holds the WordPress plugin listing. The `wp_plugins`
/// block is absent on environments without a WordPress install.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerInfo {
    #[serde(default)]
    pub wp_plugins: Option<WpPlugins>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WpPlugins {
    #[serde(default)]
    pub data: Vec<PluginRecord>,
}

impl PluginsEnvelope {
    /// Flatten the envelope into the plugin records, treating a missing
    /// `wp_plugins` block as an empty listing.
    pub fn into_plugins(self) -> Vec<PluginRecord> {
        self.environment
            .container_info
            .wp_plugins
            .map(|wp| wp.data)
            .unwrap_or_default()
    }
}

/// One installed plugin, verbatim from the per-environment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRecord {
    pub name: String,
    pub version: Option<String>,
    pub status: Option<String>,
    /// `"available"` when an update is pending; anything else means
    /// the installed version is current.
    pub update: Option<String>,
    pub update_version: Option<String>,
}

// ── Plugin update ────────────────────────────────────────────────────

/// Body for `PUT /sites/environments/{envId}/plugins`.
#[derive(Debug, Serialize)]
pub struct PluginUpdateRequest<'a> {
    pub name: &'a str,
    pub update_version: &'a str,
}

/// Response to an update request. The vendor signals acceptance via a
/// `status` field in the body, not the HTTP status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub status: u16,
    pub operation_id: Option<String>,
    pub message: Option<String>,
}

impl UpdateResponse {
    /// Whether the vendor accepted the update and started an operation.
    pub fn is_accepted(&self) -> bool {
        self.status == STATUS_ACCEPTED
    }
}

// ── Operations ───────────────────────────────────────────────────────

/// Response to `GET /operations/{operationId}`.
///
/// `status` stays at an in-progress value (e.g. 202) until the
/// server-side job finishes, then flips to 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStatus {
    pub status: u16,
    pub message: Option<String>,
}

impl OperationStatus {
    /// Whether the operation has run to completion.
    pub fn is_finished(&self) -> bool {
        self.status == STATUS_FINISHED
    }
}
