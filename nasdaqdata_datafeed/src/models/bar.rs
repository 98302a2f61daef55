//! The host framework's bar record.
//!
//! Every [`NormalizedBar`] is stamped at the *open* of its interval, carries a
//! zone-aware timestamp in the host's fixed zone and has prices rounded to
//! [`PRICE_TICK`].

use chrono::DateTime;
use chrono_tz::Tz;

use crate::models::{exchange::Exchange, interval::Interval};

/// Source tag attached to every bar produced by this datafeed.
pub const GATEWAY_NAME: &str = "NASDAQDATA";

/// Price precision for normalized bars.
pub const PRICE_TICK: f64 = 0.000001;

const PRICE_SCALE: f64 = 1_000_000.0;

/// A single OHLCV bar in the host framework's representation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBar {
    pub symbol: String,
    pub exchange: Exchange,
    pub interval: Interval,

    /// Bar open time in the host zone.
    pub datetime: DateTime<Tz>,

    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,

    /// Source tag (always [`GATEWAY_NAME`]).
    pub gateway_name: String,
}

/// Rounds `value` to six decimal places, half away from zero.
pub fn round_price(value: f64) -> f64 {
    (value * PRICE_SCALE).round() / PRICE_SCALE
}
