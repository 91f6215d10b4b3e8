//! Filtered site view: which sites run a plugin, and where it stands.

use owo_colors::OwoColorize;
use tabled::Tabled;

use wpfleet_core::catalog;
use wpfleet_core::{FleetConsole, SiteWithPlugin};

use crate::cli::{GlobalOpts, SitesArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct SiteRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Environment")]
    env_id: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Update")]
    update: String,
}

impl SiteRow {
    pub(crate) fn new(site: &SiteWithPlugin, color: bool) -> Self {
        let update = match (site.is_updatable(), site.update_version.as_deref()) {
            (true, Some(version)) => {
                let label = format!("-> {version}");
                if color {
                    label.green().to_string()
                } else {
                    label
                }
            }
            (true, None) => "available".into(),
            (false, _) => "up to date".into(),
        };
        Self {
            site: site.name.clone(),
            env_id: site.env_id.clone(),
            version: site.version.clone().unwrap_or_else(|| "-".into()),
            status: site.status.clone().unwrap_or_else(|| "-".into()),
            update,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &FleetConsole,
    args: SitesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let SitesArgs { plugin } = args;
    let selection = catalog::normalize_selection(&plugin);
    let sites = console.sites_with_plugin(&selection).await?;

    if sites.is_empty() {
        return Err(CliError::NotFound {
            resource_type: "plugin".into(),
            identifier: selection,
            list_command: "plugins".into(),
        });
    }

    render_sites(&sites, &selection, global);
    Ok(())
}

/// Render a filtered view plus the bulk-update hint line.
///
/// Shared with the update command, which re-renders the refreshed view
/// after an operation completes.
pub(crate) fn render_sites(sites: &[SiteWithPlugin], selection: &str, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        sites,
        |s| SiteRow::new(s, color),
        |s| s.env_id.clone(),
    );
    output::print_output(&out, global.quiet);

    if global.quiet {
        return;
    }

    // Hints mirror the update command's acceptance rules: bulk needs at
    // least two updatable sites, otherwise updates are per-site only.
    match catalog::bulk_update_target(sites) {
        Some(version) => {
            let updatable = sites.iter().filter(|s| s.is_updatable()).count();
            eprintln!(
                "\n{updatable} sites can be updated to {version}. \
                 Run: wpfleet update {selection} --all"
            );
        }
        None if sites.iter().all(|s| !s.is_updatable()) => {
            eprintln!("\nAll sites are up to date");
        }
        None => {
            eprintln!(
                "\nRun: wpfleet update {selection} --env <id> to update a single site"
            );
        }
    }
}
