use clap::Parser;
use tracing_subscriber::EnvFilter;

use casecmp::{cli, web, ServerConfig};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    if cli.version {
        println!("{}", cli::version_string());
        return Ok(());
    }

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("casecmp=debug,tower_http=debug,info")
    } else {
        EnvFilter::new("casecmp=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config = ServerConfig::from_cli(&cli)?;
    web::server::run(config)?;

    Ok(())
}
