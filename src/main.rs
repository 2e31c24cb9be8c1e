use clap::Parser;
use coinwatch::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "coinwatch", about = "Coin balances in your terminal")]
struct Args {
    /// API base URL (overrides config and COINWATCH_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Client route to open first, e.g. /login
    #[arg(long)]
    route: Option<String>,

    /// Log level written to coinwatch.log
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to coinwatch.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = args.log_level.parse().unwrap_or(LevelFilter::Debug);

    if let Ok(log_file) = File::create("coinwatch.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        config::CoinwatchConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            base_url: args.base_url.as_deref(),
            route: args.route.as_deref(),
        },
    );

    log::info!("coinwatch starting up against {}", resolved.base_url);

    coinwatch::tui::run(resolved)
}
