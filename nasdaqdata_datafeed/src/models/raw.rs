//! Provider-side rows as they come off the wire, before normalization.

use chrono::NaiveDate;

use crate::normalize::NormalizeError;

/// Date format of the provider's `Date` column and calendar bounds.
pub const PROVIDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// One provider record.
///
/// Price and volume cells are optional: `None` is an explicit gap. The provider
/// also writes `0` for "no data"; [`BarSeriesNormalizer`](crate::normalize::BarSeriesNormalizer)
/// folds those into `None` before filling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBarRow {
    /// Calendar date as sent by the provider (`YYYY-MM-DD`).
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    /// Last traded (close) price.
    pub last: Option<f64>,
    pub mid: Option<f64>,
    pub volume: Option<f64>,
}

/// A decoded provider dataset: the rows plus the reported availability range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    pub rows: Vec<RawBarRow>,
    pub oldest_available_date: String,
    pub newest_available_date: String,
}

impl RawDataset {
    pub fn bounds(&self) -> Result<CalendarBounds, NormalizeError> {
        CalendarBounds::parse(&self.oldest_available_date, &self.newest_available_date)
    }
}

/// Oldest and newest available date for a dataset; the reindexing range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarBounds {
    pub oldest: NaiveDate,
    pub newest: NaiveDate,
}

impl CalendarBounds {
    pub const fn new(oldest: NaiveDate, newest: NaiveDate) -> Self {
        Self { oldest, newest }
    }

    pub fn parse(oldest: &str, newest: &str) -> Result<Self, NormalizeError> {
        Ok(Self {
            oldest: parse_provider_date(oldest)?,
            newest: parse_provider_date(newest)?,
        })
    }

    /// Inverted bounds describe no days at all.
    pub fn is_degenerate(&self) -> bool {
        self.oldest > self.newest
    }

    /// Every calendar day in `[oldest, newest]`, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let newest = self.newest;
        self.oldest.iter_days().take_while(move |day| *day <= newest)
    }

    pub fn len(&self) -> usize {
        if self.is_degenerate() {
            0
        } else {
            (self.newest - self.oldest).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn parse_provider_date(value: &str) -> Result<NaiveDate, NormalizeError> {
    NaiveDate::parse_from_str(value.trim(), PROVIDER_DATE_FORMAT).map_err(|source| {
        NormalizeError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}
