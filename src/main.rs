use clap::Parser;
use profiledb::cli::{self, Command};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cmd = Command::parse();

    // Load configuration before logging so its level can seed the filter
    let config = cli::load_config(cmd.config.as_deref())?;

    // Initialize logging; stdout belongs to the menu
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    // Execute command
    cli::execute_command(cmd, config)?;

    Ok(())
}
