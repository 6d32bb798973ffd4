use clap::Parser;

use notify_bus::cli::parser::{Cli, Commands};
use notify_bus::cli::{execute_command, init_logger_from_settings, load_and_merge_config};
use notify_bus::server::Server;
use notify_bus::worker;

/// Entry point: parses the CLI, loads configuration, then dispatches to
/// the requested subcommand — `serve` (the default) starts the admission
/// HTTP server, `worker` starts the Task Worker's dispatch-queue consumer,
/// `migrate` runs database migrations. `--dry-run` validates configuration
/// for `serve` and `worker` without starting anything.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_and_merge_config(&cli)?;
    let _handle = init_logger_from_settings(&settings)?;

    tracing::info!(
        app_name = %settings.application.name,
        app_version = %settings.application.version,
        "Application starting"
    );

    // Runs validation and, for `migrate`, the migration itself.
    execute_command(&cli, settings.clone()).await?;

    match &cli.command {
        Some(Commands::Migrate { .. }) => Ok(()),
        Some(Commands::Serve { dry_run, .. }) if *dry_run => Ok(()),
        Some(Commands::Worker { dry_run }) if *dry_run => Ok(()),
        Some(Commands::Worker { .. }) => worker::run(settings).await,
        Some(Commands::Serve { .. }) | None => Server::new(settings).run().await,
    }
}
