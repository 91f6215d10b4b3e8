mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wpfleet_core::FleetConsole;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need API credentials
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "wpfleet", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the fleet API
        cmd => {
            let console = build_console(&cli.global)?;

            // Ctrl-C tears down any in-flight polling loop
            let cancel = console.cancellation_token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &console, &cli.global).await
        }
    }
}

/// Build a `FleetConsole` from the config file, profile, and CLI overrides.
fn build_console(global: &cli::GlobalOpts) -> Result<FleetConsole, CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    let session = match cfg.profiles.get(&profile_name) {
        Some(profile) => config::resolve_session(profile, &profile_name, global, &cfg.defaults)?,

        // No profile found -- build from CLI flags / env vars alone
        None => {
            let bare = config::Profile::default();
            config::resolve_session(&bare, &profile_name, global, &cfg.defaults)?
        }
    };

    Ok(FleetConsole::from_api_key(
        &session.api_url,
        &session.api_key,
        session.company,
        &session.transport,
        session.poll,
    )?)
}
