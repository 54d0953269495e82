use clap::Parser;
use pageshot_logging::LogDestination;
use pageshot_server::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Args::parse().into_config();

    let destination = match config.log_file.as_deref() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    pageshot_logging::initialize(destination, config.log_level);

    pageshot_server::run(config).await
}
