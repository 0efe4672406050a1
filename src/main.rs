use clap::Parser;

use realty_rs::cli::Cli;
use realty_rs::logger::init_logger;
use realty_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.load_settings()?;

    init_logger(&settings.logger)?;

    if cli.dry_run {
        tracing::info!(
            address = %settings.server.address(),
            "Configuration is valid, exiting (dry run)"
        );
        return Ok(());
    }

    Server::new(settings).run().await
}
