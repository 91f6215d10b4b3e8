//! Plugin update handlers: single-site and fleet-wide bulk flows.

use wpfleet_core::catalog;
use wpfleet_core::{FleetConsole, SiteWithPlugin, UpdateOutcome};

use crate::cli::{GlobalOpts, UpdateArgs};
use crate::error::CliError;

use super::{sites, util};

pub async fn handle(
    console: &FleetConsole,
    args: UpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let UpdateArgs {
        plugin,
        env,
        all,
        version,
    } = args;
    let selection = catalog::normalize_selection(&plugin);
    let view = console.sites_with_plugin(&selection).await?;

    if view.is_empty() {
        return Err(CliError::NotFound {
            resource_type: "plugin".into(),
            identifier: selection,
            list_command: "plugins".into(),
        });
    }

    if all {
        bulk(console, &selection, &view, global).await
    } else {
        single(console, &selection, &view, env, version, global).await
    }
}

// ── Single site ─────────────────────────────────────────────────────

async fn single(
    console: &FleetConsole,
    selection: &str,
    view: &[SiteWithPlugin],
    env: Option<String>,
    version: Option<String>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let site = match env.as_deref() {
        Some(env_id) => view.iter().find(|s| s.env_id == env_id).ok_or_else(|| {
            CliError::NotFound {
                resource_type: "environment".into(),
                identifier: env_id.to_owned(),
                list_command: format!("sites {selection}"),
            }
        })?,
        // With exactly one site in the view the target is unambiguous
        None if view.len() == 1 => &view[0],
        None => {
            return Err(CliError::Validation {
                field: "env".into(),
                reason: format!(
                    "{} sites run '{selection}'; pick one with --env or use --all",
                    view.len()
                ),
            });
        }
    };

    let version = match version.as_deref().or(site.update_version.as_deref()) {
        Some(v) => v,
        None => {
            return Err(CliError::Validation {
                field: "version".into(),
                reason: format!(
                    "no update advertised for '{selection}' on {}; pass --version explicitly",
                    site.name
                ),
            });
        }
    };

    let prompt = format!("Update '{selection}' on {} to {version}?", site.name);
    if !util::confirm(&prompt, global.yes)? {
        return Ok(());
    }

    let spinner = util::update_spinner(
        "Updating WordPress plugin in progress...",
        global.quiet,
    );
    let report = console.update_one(selection, &site.env_id, version).await;
    spinner.finish_and_clear();
    let report = report?;

    match report.outcome {
        UpdateOutcome::Completed { polls, .. } => {
            if !global.quiet {
                eprintln!(
                    "Updated '{selection}' on {} to {version} ({polls} status checks)",
                    site.name
                );
            }
            if let Some(refreshed) = report.refreshed {
                sites::render_sites(&refreshed, selection, global);
            }
            Ok(())
        }
        UpdateOutcome::NotAccepted { status } => Err(CliError::Core(format!(
            "update of '{selection}' on {} was not accepted (status {status})",
            site.name
        ))),
        UpdateOutcome::TimedOut { operation_id, polls } => Err(CliError::Core(format!(
            "operation {operation_id} still in flight after {polls} status checks"
        ))),
        UpdateOutcome::Cancelled => {
            if !global.quiet {
                eprintln!("Update cancelled");
            }
            Ok(())
        }
    }
}

// ── Bulk ────────────────────────────────────────────────────────────

async fn bulk(
    console: &FleetConsole,
    selection: &str,
    view: &[SiteWithPlugin],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let Some(version) = catalog::bulk_update_target(view) else {
        return Err(CliError::Validation {
            field: "all".into(),
            reason: format!(
                "bulk update needs at least two sites with an available update; \
                 run: wpfleet sites {selection}"
            ),
        });
    };
    let version = version.to_owned();
    let updatable = view.iter().filter(|s| s.is_updatable()).count();

    let prompt =
        format!("Update '{selection}' to {version} on {updatable} sites?");
    if !util::confirm(&prompt, global.yes)? {
        return Ok(());
    }

    let spinner = util::update_spinner(
        "Updating WordPress plugin in progress...",
        global.quiet,
    );
    let report = console.update_all(selection, view).await;
    spinner.finish_and_clear();
    let report = report?;

    let mut failures = 0usize;
    for (name, result) in &report.outcomes {
        if global.quiet {
            if !matches!(result, Ok(UpdateOutcome::Completed { .. })) {
                failures += 1;
            }
            continue;
        }
        match result {
            Ok(UpdateOutcome::Completed { .. }) => eprintln!("  {name}: updated"),
            Ok(UpdateOutcome::NotAccepted { status }) => {
                failures += 1;
                eprintln!("  {name}: not accepted (status {status})");
            }
            Ok(UpdateOutcome::TimedOut { polls, .. }) => {
                failures += 1;
                eprintln!("  {name}: still in flight after {polls} status checks");
            }
            Ok(UpdateOutcome::Cancelled) => {
                failures += 1;
                eprintln!("  {name}: cancelled");
            }
            Err(err) => {
                failures += 1;
                eprintln!("  {name}: {err}");
            }
        }
    }
    if !global.quiet {
        eprintln!(
            "{} of {} sites updated",
            report.completed(),
            report.outcomes.len()
        );
    }

    if let Some(refreshed) = report.refreshed {
        sites::render_sites(&refreshed, selection, global);
    }

    if failures > 0 {
        return Err(CliError::Core(format!(
            "{failures} of {} updates did not complete",
            report.outcomes.len()
        )));
    }
    Ok(())
}
