use clap::Parser;
use signal_scraper::cli::{Cli, Commands};
use signal_scraper::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).unwrap_or_default()
    });

    // Initialize telemetry
    let _telemetry = signal_scraper::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Parse(args) => {
            args.execute(&config).await?;
        }
        Commands::Scan(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
