use migration_loadgen::{Config, LoadTest};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migration_loadgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    info!(
        "Loaded configuration: target_host={}, users={}",
        config.target_host, config.users
    );
    match config.run_time {
        Some(run_time) => info!("Run time: {:?}", run_time),
        None => info!("No run time set, press Ctrl-C to stop"),
    }

    let summary = LoadTest::new(config).run().await?;
    summary.log();
    println!("{}", summary.to_json());

    Ok(())
}
