//! Plugin catalog command handler.

use tabled::Tabled;

use wpfleet_core::FleetConsole;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PluginRow {
    #[tabled(rename = "Plugin")]
    name: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &FleetConsole, global: &GlobalOpts) -> Result<(), CliError> {
    let catalog = console.plugin_catalog().await?;
    let names: Vec<String> = catalog.into_iter().collect();

    if names.is_empty() {
        if !global.quiet {
            eprintln!("No plugins installed anywhere in the fleet");
        }
        return Ok(());
    }

    let out = output::render_list(
        &global.output,
        &names,
        |n| PluginRow { name: n.clone() },
        std::string::ToString::to_string,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
