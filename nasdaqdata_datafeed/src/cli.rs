//! Command-line front end (feature `cli`).

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{
    models::{
        bar::NormalizedBar, exchange::Exchange, interval::Interval, request::HistoryRequest,
    },
    tz::{DstPolicy, LocalTimeError, TARGET_TZ, attach_zone},
};

#[derive(Parser)]
#[command(author, version, about = "Query historical bars from Nasdaq Data Link")]
pub struct Cli {
    /// Path to a TOML config file with a [datafeed] table. Falls back to
    /// NASDAQDATA_* environment variables.
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and normalize the bar history of one dataset
    History {
        /// Dataset code (e.g. "GOLD")
        #[arg(long)]
        symbol: String,

        /// Database code (e.g. "LBMA")
        #[arg(long)]
        exchange: String,

        /// Bar interval: 1m, 60m or 1d
        #[arg(long, default_value = "1d")]
        interval: Interval,

        /// First day to return (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day to return (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

/// Builds a request covering whole days `[start, end]` in the bar zone.
pub fn history_request(
    symbol: String,
    exchange: String,
    interval: Interval,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<HistoryRequest, LocalTimeError> {
    let start = match start {
        Some(day) => local_midnight(day)?,
        None => DateTime::<Utc>::MIN_UTC,
    };
    let end = match end.and_then(|day| day.succ_opt()) {
        Some(next) => Some(local_midnight(next)? - TimeDelta::nanoseconds(1)),
        None => None,
    };

    Ok(HistoryRequest {
        symbol,
        exchange: Exchange::new(exchange),
        interval,
        start,
        end,
    })
}

fn local_midnight(day: NaiveDate) -> Result<DateTime<Utc>, LocalTimeError> {
    let midnight = attach_zone(day.and_time(NaiveTime::MIN), TARGET_TZ, DstPolicy::Lenient)?;
    Ok(midnight.with_timezone(&Utc))
}

/// One output line.
#[derive(Serialize)]
pub struct BarRecord<'a> {
    pub symbol: &'a str,
    pub exchange: &'a str,
    pub interval: Interval,
    pub datetime: String,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
    pub gateway_name: &'a str,
}

impl<'a> From<&'a NormalizedBar> for BarRecord<'a> {
    fn from(bar: &'a NormalizedBar) -> Self {
        Self {
            symbol: &bar.symbol,
            exchange: bar.exchange.as_str(),
            interval: bar.interval,
            datetime: bar.datetime.to_rfc3339(),
            open_price: bar.open_price,
            high_price: bar.high_price,
            low_price: bar.low_price,
            close_price: bar.close_price,
            volume: bar.volume,
            gateway_name: &bar.gateway_name,
        }
    }
}
