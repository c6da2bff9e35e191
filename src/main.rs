use clap::Parser;
use goldboard::cli::{load_config, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    // Initialize telemetry
    let _telemetry = goldboard::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting gold price feed");
            args.execute(&config).await?;
        }
        Commands::Tick(args) => {
            args.execute(&config).await?;
        }
        Commands::Week(args) => {
            args.execute(&config).await?;
        }
        Commands::History(args) => {
            args.execute(&config).await?;
        }
        Commands::Distances(args) => {
            args.execute().await?;
        }
        Commands::Matches(args) => {
            args.execute().await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Source: {} (timeout {}s)",
                config.source.url, config.source.timeout_secs
            );
            println!(
                "  Conversion: {} g/oz, rate {}",
                config.source.grams_per_troy_ounce, config.source.conversion_rate
            );
            println!(
                "  Simulator: seed={}, band=±{}, floor={}",
                config.simulator.seed_price, config.simulator.band, config.simulator.floor
            );
            println!(
                "  Scheduler: every {}s, fetch timeout {}s, start {:?}",
                config.scheduler.interval_secs,
                config.scheduler.fetch_timeout_secs,
                config.scheduler.start
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={:?}",
                config.telemetry.log_level, config.telemetry.log_format, config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
