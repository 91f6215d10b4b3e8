// ── Fleet resolver ──
//
// One resolution cycle: sites → environments → plugins, three
// sequential stages. Within a stage every request is dispatched
// concurrently and joined all-or-nothing; the first failure aborts
// the whole cycle and the previous snapshot (if any) stays with the
// caller. Output order matches the vendor's site listing order.

use futures_util::future::try_join_all;
use tracing::{debug, warn};

use wpfleet_api::FleetClient;

use crate::error::CoreError;
use crate::model::{Environment, Site, SitePlugins};

/// Resolve the full fleet view for one company.
///
/// Read-only against the vendor API. Sites with zero environments are
/// skipped with a warning rather than failing the cycle — an
/// unprovisioned site should not blank the whole console.
pub async fn resolve_fleet(
    client: &FleetClient,
    company: &str,
) -> Result<Vec<SitePlugins>, CoreError> {
    // Stage 1: enumerate fleet members.
    let listing = client.list_sites(company).await?;
    debug!(sites = listing.company.sites.len(), "resolved site listing");

    // Stage 2: fan out environment listings, all-or-nothing.
    let with_envs = try_join_all(listing.company.sites.iter().map(|site| async {
        let envs = client.list_environments(&site.id).await?;
        Ok::<_, CoreError>(Site {
            id: site.id.clone(),
            name: site.display_name.clone(),
            environments: envs
                .site
                .environments
                .into_iter()
                .map(|e| Environment { id: e.id })
                .collect(),
        })
    }))
    .await?;

    // Only the first environment per site is meaningful here.
    let canonical: Vec<(String, Site)> = with_envs
        .into_iter()
        .filter_map(|site| match site.environments.first() {
            Some(env) => Some((env.id.clone(), site)),
            None => {
                warn!(site = %site.name, "site has no environments, skipping");
                None
            }
        })
        .collect();

    // Stage 3: fan out plugin listings per canonical environment.
    let rows = try_join_all(canonical.into_iter().map(|(env_id, site)| async move {
        let plugins = client.list_plugins(&env_id).await?.into_plugins();
        Ok::<_, CoreError>(SitePlugins {
            env_id,
            site_name: site.name,
            plugins,
        })
    }))
    .await?;

    debug!(rows = rows.len(), "resolution cycle complete");
    Ok(rows)
}
