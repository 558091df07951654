use clap::Parser;

use shareit::cli::{Cli, Commands, MigrateCommandHandler, init_logger_from_settings, load_settings};
use shareit::gateway::GatewayServer;
use shareit::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_logger_from_settings(&settings)?;

    match &cli.command {
        Some(Commands::Gateway { dry_run, .. }) => {
            if *dry_run {
                settings.validate_for_gateway()?;
                println!("Gateway configuration is valid");
                return Ok(());
            }
            GatewayServer::new(settings).run().await
        }
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await?;
            Ok(())
        }
        Some(Commands::Serve { dry_run, .. }) if *dry_run => {
            settings.validate_for_server()?;
            println!("Server configuration is valid");
            Ok(())
        }
        Some(Commands::Serve { .. }) | None => Server::new(settings).run().await,
    }
}
