//! Normalization of a raw provider series into host bars.
//!
//! The provider stamps bars at their close, skips non-trading days and writes
//! `0` where it has no value. [`BarSeriesNormalizer`] turns that into one bar
//! per calendar day in the dataset's bounds, stamped at the bar open in the
//! host zone, with gaps forward-filled from the previous day.
//!
//! ```
//! use chrono::NaiveDate;
//! use nasdaqdata_datafeed::models::{
//!     exchange::Exchange,
//!     interval::IntervalSpec,
//!     raw::{CalendarBounds, RawBarRow},
//! };
//! use nasdaqdata_datafeed::normalize::BarSeriesNormalizer;
//!
//! let rows = vec![RawBarRow {
//!     date: "2020-01-01".to_string(),
//!     open: Some(10.0),
//!     high: Some(11.0),
//!     low: Some(9.0),
//!     last: Some(10.0),
//!     mid: Some(10.0),
//!     volume: Some(100.0),
//! }];
//! let bounds = CalendarBounds::new(
//!     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2020, 1, 3).unwrap(),
//! );
//! let bars = BarSeriesNormalizer::default()
//!     .normalize(&rows, bounds, IntervalSpec::Daily, "GOLD", &Exchange::new("LBMA"))
//!     .unwrap();
//! assert_eq!(bars.len(), 3);
//! assert!(bars.iter().all(|bar| bar.close_price == 10.0));
//! ```

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    models::{
        bar::{GATEWAY_NAME, NormalizedBar, round_price},
        exchange::Exchange,
        interval::IntervalSpec,
        raw::{CalendarBounds, RawBarRow, parse_provider_date},
    },
    tz::{DstPolicy, LocalTimeError, TARGET_TZ, attach_zone},
};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Invalid provider date {value:?}: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Cannot stamp bar open time: {0}")]
    LocalTime(#[from] LocalTimeError),
}

/// Stateless transform from provider rows to [`NormalizedBar`]s.
#[derive(Debug, Clone, Copy)]
pub struct BarSeriesNormalizer {
    tz: Tz,
    dst_policy: DstPolicy,
}

impl Default for BarSeriesNormalizer {
    fn default() -> Self {
        Self {
            tz: TARGET_TZ,
            dst_policy: DstPolicy::default(),
        }
    }
}

impl BarSeriesNormalizer {
    pub fn new(tz: Tz, dst_policy: DstPolicy) -> Self {
        Self { tz, dst_policy }
    }

    /// Reindexes `raw_rows` onto every day of `bounds`, forward-fills gaps and
    /// stamps each day at its bar open.
    ///
    /// Returns an empty series for empty input or inverted bounds. Leading days
    /// with no price on or before them are dropped.
    ///
    /// # Errors
    ///
    /// * [`NormalizeError::InvalidDate`] if a row date is not `YYYY-MM-DD`.
    /// * [`NormalizeError::LocalTime`] if an open time cannot be placed in the zone.
    pub fn normalize(
        &self,
        raw_rows: &[RawBarRow],
        bounds: CalendarBounds,
        interval: IntervalSpec,
        symbol: &str,
        exchange: &Exchange,
    ) -> Result<Vec<NormalizedBar>, NormalizeError> {
        if raw_rows.is_empty() || bounds.is_degenerate() {
            debug!(
                symbol,
                rows = raw_rows.len(),
                ?bounds,
                "nothing to normalize"
            );
            return Ok(Vec::new());
        }

        let mut by_date: HashMap<NaiveDate, BarFields> = HashMap::with_capacity(raw_rows.len());
        for row in raw_rows {
            let date = parse_provider_date(&row.date)?;
            by_date.entry(date).or_insert_with(|| BarFields::from_row(row));
        }

        let adjustment = interval.adjustment();
        let mut bars = Vec::with_capacity(bounds.len());
        let mut carried = BarFields::default();
        let mut skipped = 0usize;

        for day in bounds.days() {
            let mut fields = by_date.remove(&day).unwrap_or_default();
            fields.fill_from(&carried);
            carried = fields;

            let Some(prices) = fields.prices() else {
                skipped += 1;
                continue;
            };

            let open_at = day.and_time(NaiveTime::MIN) - adjustment;
            let datetime = attach_zone(open_at, self.tz, self.dst_policy)?;

            bars.push(NormalizedBar {
                symbol: symbol.to_string(),
                exchange: exchange.clone(),
                interval: interval.interval(),
                datetime,
                open_price: round_price(prices.open),
                high_price: round_price(prices.high),
                low_price: round_price(prices.low),
                close_price: round_price(prices.close),
                volume: fields.volume.unwrap_or(0.0),
                gateway_name: GATEWAY_NAME.to_string(),
            });
        }

        if skipped > 0 {
            warn!(
                symbol,
                %exchange,
                skipped,
                oldest = %bounds.oldest,
                "dropped leading days with no provider price"
            );
        }
        if !by_date.is_empty() {
            debug!(symbol, outside = by_date.len(), "ignored rows outside bounds");
        }
        debug!(symbol, bars = bars.len(), "normalized series");

        Ok(bars)
    }
}

/// Per-day values after the sentinel has been folded into `None`.
#[derive(Debug, Clone, Copy, Default)]
struct BarFields {
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    mid: Option<f64>,
    volume: Option<f64>,
}

struct Prices {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl BarFields {
    fn from_row(row: &RawBarRow) -> Self {
        Self {
            open: present(row.open),
            high: present(row.high),
            low: present(row.low),
            close: present(row.last),
            mid: present(row.mid),
            volume: present(row.volume),
        }
    }

    /// Takes each missing field from `previous`.
    fn fill_from(&mut self, previous: &BarFields) {
        self.open = self.open.or(previous.open);
        self.high = self.high.or(previous.high);
        self.low = self.low.or(previous.low);
        self.close = self.close.or(previous.close);
        self.mid = self.mid.or(previous.mid);
        self.volume = self.volume.or(previous.volume);
    }

    /// Open falls back to the mid price for datasets without an `Open` column.
    fn prices(&self) -> Option<Prices> {
        Some(Prices {
            open: self.open.or(self.mid)?,
            high: self.high?,
            low: self.low?,
            close: self.close?,
        })
    }
}

/// Zero (and NaN) is the provider's "no data".
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}
