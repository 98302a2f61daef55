use std::error::Error;

use clap::Parser;
use nasdaqdata_datafeed::{
    Datafeed, NasdaqDataDatafeed,
    cli::{BarRecord, Cli, Commands, history_request},
    config::DatafeedSettings,
    reporter::TracingReporter,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("nasdaqdata_datafeed=info".parse()?))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => DatafeedSettings::from_file(path)?,
        None => DatafeedSettings::from_env()?,
    };
    let mut datafeed = NasdaqDataDatafeed::new(settings)?;

    match cli.command {
        Commands::History {
            symbol,
            exchange,
            interval,
            start,
            end,
        } => {
            let req = history_request(symbol, exchange, interval, start, end)?;
            let bars = datafeed.query_bar_history(&req, &TracingReporter).await?;

            for bar in &bars {
                println!("{}", serde_json::to_string(&BarRecord::from(bar))?);
            }

            // summary on stderr so stdout stays machine-readable
            eprintln!("SUMMARY: {} bars for {}.{}", bars.len(), req.exchange, req.symbol);
        }
    }

    Ok(())
}
