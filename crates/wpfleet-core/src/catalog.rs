// ── Plugin catalog and filter ──
//
// Pure functions over a resolution snapshot: the deduplicated plugin
// name catalog, the user-selection filter/projection, and the bulk
// update eligibility check.

use std::collections::BTreeSet;

use crate::model::{SitePlugins, SiteWithPlugin};

/// Distinct plugin names seen anywhere in the fleet.
///
/// The union is deduplicated by the set; no ordering is required, the
/// sort is just for stable display. Empty listings contribute nothing.
pub fn plugin_catalog(fleet: &[SitePlugins]) -> BTreeSet<String> {
    fleet
        .iter()
        .flat_map(|site| site.plugins.iter())
        .map(|plugin| plugin.name.clone())
        .collect()
}

/// Normalize an operator-chosen plugin name at input time.
///
/// Vendor plugin slugs are lower case; the comparison in
/// [`sites_running`] is case-sensitive against the normalized form.
pub fn normalize_selection(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Filter a snapshot down to the sites running `selection`, projecting
/// the matched entry's fields.
///
/// A site is included iff at least one plugin entry's name equals the
/// (already normalized) selection exactly. The output replaces any
/// previous list wholesale and is idempotent for a fixed snapshot.
pub fn sites_running(fleet: &[SitePlugins], selection: &str) -> Vec<SiteWithPlugin> {
    fleet
        .iter()
        .filter_map(|site| {
            let matched = site.plugins.iter().find(|p| p.name == selection)?;
            Some(SiteWithPlugin {
                env_id: site.env_id.clone(),
                name: site.site_name.clone(),
                version: matched.version.clone(),
                status: matched.status.clone(),
                update_available: matched.update.clone(),
                update_version: matched.update_version.clone(),
            })
        })
        .collect()
}

/// Target version for a bulk update, if one is on offer.
///
/// Bulk updating is only worth surfacing when two or more of the
/// displayed sites are updatable; the shared label is the first
/// non-null advertised target version.
pub fn bulk_update_target(sites: &[SiteWithPlugin]) -> Option<&str> {
    let updatable = sites.iter().filter(|s| s.is_updatable()).count();
    if updatable < 2 {
        return None;
    }
    sites
        .iter()
        .find_map(|s| s.update_version.as_deref())
}
