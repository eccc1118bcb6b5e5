// Entrypoint for the HaHaSaaS terminal.
// - Load configuration and start logging.
// - Build the REST client and hand a fresh session to the UI loop.

use anyhow::Context;
use hahasaas_cli::{api::ApiClient, config::Config, dispatch::Interpreter, logging, ui};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    logging::init(&config.log_level);
    tracing::debug!(api_url = %config.api_url, timeout_secs = config.timeout_secs, "starting");

    let api = ApiClient::from_config(&config).context("Failed to build HTTP client")?;

    ui::run(Interpreter::new(api)).await
}
