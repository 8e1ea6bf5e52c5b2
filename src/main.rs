use anyhow::{Context, Result};
use artemisa_quote::{cli::{Args, CliApp}, utils::Config};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()
        .and_then(|config| config.with_catalog_path(args.catalog.clone()))
        .context("Failed to load configuration")?;

    let filter = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🌷 Artemisa quote starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let app = CliApp::new(config)?;
    app.run(args.command)?;

    tracing::info!("🌷 Artemisa quote stopped");
    Ok(())
}
