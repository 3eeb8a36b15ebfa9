// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, create an API
//   client and hand it to the UI loop.
// - Returns `anyhow::Result` so setup errors are printed with context.

use anyhow::Context;
use clap::Parser;
use sgrh_cli::{api::ApiClient, cli::Cli, logger, ui::main_menu};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let config = cli.client_config().context("Invalid client configuration")?;
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "starting sgrh-cli");
    let api = ApiClient::new(&config).context("Failed to build HTTP client")?;

    // Blocks until the user picks "Exit".
    main_menu(api)?;
    Ok(())
}
