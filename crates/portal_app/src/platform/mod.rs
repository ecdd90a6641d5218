mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod records;
mod render;
mod shell;

use anyhow::Result;
use portal_logging::portal_info;

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let mut config = config::PortalConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    logging::initialize(config.log_destination, cli.verbose);
    portal_info!(
        "portal {} starting against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_url
    );

    let mut app = app::App::new(&config)?;
    commands::execute(&mut app, cli.command)
}
