//! # Payline Main Entry Point
//!
//! Loads the profile, builds the gateway client and runs the requested flow.

use anyhow::{Context, Result};
use payline::cmd_args::{CommandLineArgs, FlowCommand};
use payline::config::{self, GatewayConnectionProfile, IniProfile, IniProfileStore};
use payline::views::TerminalRenderer;
use payline::{AppController, GatewayClient};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CommandLineArgs::parse();
    init_tracing(args.verbose());

    let profile = load_profile(&args)?;
    let client = GatewayClient::new(&profile).context("Failed to create gateway client")?;

    let colored = atty::is(atty::Stream::Stdout);
    let renderer = TerminalRenderer::new(std::io::stdout(), colored);
    let mut app = AppController::new(client, renderer);
    app.set_show_raw(args.raw());

    if matches!(args.command(), FlowCommand::Shell) {
        println!("🔵 Payline - Bankily-pay");
    }

    let succeeded = app.run_once(args.command().clone()).await?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(verbose: bool) {
    // Initialize tracing with configurable log level
    #[allow(clippy::disallowed_methods)]
    let log_level = if verbose {
        "debug".to_string()
    } else {
        std::env::var(config::LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| "error".to_string())
    };

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Tracing initialized with level '{}'", log_level);
}

/// Load profile from INI file or return blank profile if not found, then apply CLI overrides
fn load_profile(args: &CommandLineArgs) -> Result<IniProfile> {
    let profile_name = args.profile();
    let profile_path = config::get_profile_path();
    tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);

    let store = IniProfileStore::new(&profile_path);
    let mut profile = match store.get_profile(profile_name)? {
        Some(p) => {
            tracing::debug!("Profile loaded successfully, server: {:?}", p.server());
            p
        }
        None => {
            tracing::debug!("Profile '{}' not found, using blank profile", profile_name);
            IniProfile::blank()
        }
    };

    if let Some(base_url) = args.base_url() {
        profile = profile.with_server(base_url);
    }
    if let Some(api_key) = args.api_key() {
        profile = profile.with_api_key(api_key);
    }
    Ok(profile)
}
