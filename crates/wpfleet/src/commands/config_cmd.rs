//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            // Plaintext keys never leave the config file
            for profile in cfg.profiles.values_mut() {
                if profile.api_key.is_some() {
                    profile.api_key = Some("<redacted>".into());
                }
            }
            let out = output::render_item(&global.output, &cfg, |c| format!("{c:#?}"));
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init {
            name,
            company,
            api_url,
            api_key_env,
        } => {
            let mut cfg = config::load_config_or_default();

            cfg.profiles.insert(
                name.clone(),
                Profile {
                    api_url,
                    company: Some(company),
                    api_key: None,
                    api_key_env,
                },
            );
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }
            config::save_config(&cfg)?;

            eprintln!("✓ Profile '{name}' written to {}", config::config_path().display());
            eprintln!("  Provide the API key via WPFLEET_API_KEY or --api-key");
            eprintln!("  Test it: wpfleet plugins");
            Ok(())
        }
    }
}
