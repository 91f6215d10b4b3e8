// ── FleetConsole facade ──
//
// Everything a frontend needs: catalog discovery, filtered site
// resolution, and the single/bulk update flows. All state is rebuilt
// from the vendor API on every call; the console deliberately holds
// nothing but the client, the company id, and the poll policy.

use std::collections::BTreeSet;

use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use wpfleet_api::{FleetClient, TransportConfig};

use crate::catalog;
use crate::error::CoreError;
use crate::model::{SitePlugins, SiteWithPlugin};
use crate::resolver;
use crate::update::{self, PollPolicy, UpdateOutcome};

/// Result of a single-site update flow.
#[derive(Debug)]
pub struct UpdateReport {
    pub outcome: UpdateOutcome,
    /// Fresh filtered view, present iff the operation completed and
    /// triggered a re-resolution.
    pub refreshed: Option<Vec<SiteWithPlugin>>,
}

/// Result of a bulk update flow.
#[derive(Debug)]
pub struct BulkReport {
    /// One entry per dispatched site, in display order: site name and
    /// how its independent submit+poll flow ended.
    pub outcomes: Vec<(String, Result<UpdateOutcome, CoreError>)>,
    pub refreshed: Option<Vec<SiteWithPlugin>>,
}

impl BulkReport {
    /// Number of sites whose operation ran to completion.
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, r)| matches!(r, Ok(UpdateOutcome::Completed { .. })))
            .count()
    }
}

/// Facade over one company's fleet.
pub struct FleetConsole {
    client: FleetClient,
    company: String,
    poll: PollPolicy,
    cancel: CancellationToken,
}

impl FleetConsole {
    pub fn new(client: FleetClient, company: impl Into<String>, poll: PollPolicy) -> Self {
        Self {
            client,
            company: company.into(),
            poll,
            cancel: CancellationToken::new(),
        }
    }

    /// Convenience constructor from raw credentials.
    pub fn from_api_key(
        base_url: &str,
        api_key: &secrecy::SecretString,
        company: impl Into<String>,
        transport: &TransportConfig,
        poll: PollPolicy,
    ) -> Result<Self, CoreError> {
        let client = FleetClient::from_api_key(base_url, api_key, transport)?;
        Ok(Self::new(client, company, poll))
    }

    /// Token that aborts any in-flight polling loop when cancelled
    /// (e.g. wired to Ctrl-C by the CLI).
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    // ── Resolution ───────────────────────────────────────────────────

    /// Run one full resolution cycle: sites → environments → plugins.
    pub async fn resolve_fleet(&self) -> Result<Vec<SitePlugins>, CoreError> {
        resolver::resolve_fleet(&self.client, &self.company).await
    }

    /// The distinct plugin names installed anywhere in the fleet.
    pub async fn plugin_catalog(&self) -> Result<BTreeSet<String>, CoreError> {
        let fleet = self.resolve_fleet().await?;
        Ok(catalog::plugin_catalog(&fleet))
    }

    /// Fresh resolution filtered down to sites running `selection`.
    ///
    /// `selection` must already be normalized via
    /// [`catalog::normalize_selection`]; the previous view (if the
    /// caller kept one) is meant to be replaced wholesale.
    pub async fn sites_with_plugin(
        &self,
        selection: &str,
    ) -> Result<Vec<SiteWithPlugin>, CoreError> {
        let fleet = self.resolve_fleet().await?;
        Ok(catalog::sites_running(&fleet, selection))
    }

    // ── Updates ──────────────────────────────────────────────────────

    /// Update `selection` on one environment and poll the operation to
    /// completion, then re-resolve the filtered view exactly once.
    pub async fn update_one(
        &self,
        selection: &str,
        env_id: &str,
        version: &str,
    ) -> Result<UpdateReport, CoreError> {
        let outcome =
            update::run_update(&self.client, env_id, selection, version, &self.poll, &self.cancel)
                .await?;

        let refreshed = match &outcome {
            UpdateOutcome::Completed { .. } => {
                info!(env_id, plugin = selection, "update finished, re-resolving fleet");
                Some(self.sites_with_plugin(selection).await?)
            }
            _ => None,
        };

        Ok(UpdateReport { outcome, refreshed })
    }

    /// Update `selection` on every updatable site in the given view.
    ///
    /// Each eligible site gets its own independent submit+poll flow,
    /// all running in parallel with their own timers. One PUT is issued
    /// per site whose record advertises an available update; the rest
    /// are left untouched. When the whole batch has settled, a single
    /// re-resolution refreshes the view (rather than one per
    /// completion, which would only produce redundant identical
    /// snapshots).
    pub async fn update_all(
        &self,
        selection: &str,
        sites: &[SiteWithPlugin],
    ) -> Result<BulkReport, CoreError> {
        let eligible: Vec<(&str, &str, &str)> = sites
            .iter()
            .filter(|s| s.is_updatable())
            .filter_map(|s| {
                s.update_version
                    .as_deref()
                    .map(|v| (s.name.as_str(), s.env_id.as_str(), v))
            })
            .collect();
        debug!(
            plugin = selection,
            eligible = eligible.len(),
            "dispatching bulk update"
        );

        let flows = eligible.into_iter().map(|(name, env_id, version)| async move {
            let outcome = update::run_update(
                &self.client,
                env_id,
                selection,
                version,
                &self.poll,
                &self.cancel,
            )
            .await;
            (name.to_owned(), outcome)
        });

        let outcomes = join_all(flows).await;

        let any_completed = outcomes
            .iter()
            .any(|(_, r)| matches!(r, Ok(UpdateOutcome::Completed { .. })));
        let refreshed = if any_completed {
            info!(plugin = selection, "bulk update settled, re-resolving fleet");
            Some(self.sites_with_plugin(selection).await?)
        } else {
            None
        };

        Ok(BulkReport {
            outcomes,
            refreshed,
        })
    }
}
