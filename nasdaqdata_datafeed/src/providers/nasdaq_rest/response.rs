use serde::Deserialize;
use serde_json::Value;

use crate::{
    models::raw::{RawBarRow, RawDataset},
    providers::{InternalSnafu, ProviderError},
};

const DATE_COLUMN: &str = "Date";

#[derive(Deserialize, Debug)]
pub struct NasdaqResponse {
    pub dataset: NasdaqDataset,
}

/// The `dataset` object of a `/datasets/{db}/{code}.json` response.
///
/// `data` is column-major per row: `data[i][j]` is the value of
/// `column_names[j]` on row `i`.
#[derive(Deserialize, Debug)]
pub struct NasdaqDataset {
    pub column_names: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
    #[serde(default)]
    pub oldest_available_date: Option<String>,
    #[serde(default)]
    pub newest_available_date: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct NasdaqErrorResponse {
    pub quandl_error: NasdaqApiError,
}

#[derive(Deserialize, Debug)]
pub struct NasdaqApiError {
    pub code: String,
    pub message: String,
}

/// Positions of the columns we read; `None` when the dataset lacks one.
struct ColumnIndex {
    date: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    last: Option<usize>,
    mid: Option<usize>,
    volume: Option<usize>,
}

impl ColumnIndex {
    fn from_names(names: &[String]) -> Result<Self, ProviderError> {
        let find = |name: &str| names.iter().position(|n| n == name);
        let Some(date) = find(DATE_COLUMN) else {
            return InternalSnafu {
                message: format!("response has no {DATE_COLUMN} column (columns: {names:?})"),
            }
            .fail();
        };
        Ok(Self {
            date,
            open: find("Open"),
            high: find("High"),
            low: find("Low"),
            last: find("Last"),
            mid: find("Mid"),
            volume: find("Volume"),
        })
    }
}

fn number_at(row: &[Value], index: Option<usize>) -> Option<f64> {
    index.and_then(|i| row.get(i)).and_then(Value::as_f64)
}

impl NasdaqDataset {
    /// Maps provider columns onto [`RawBarRow`]s by name.
    pub fn into_raw_dataset(self) -> Result<RawDataset, ProviderError> {
        let columns = ColumnIndex::from_names(&self.column_names)?;

        let rows = self
            .data
            .iter()
            .map(|row| {
                let date = match row.get(columns.date) {
                    Some(Value::String(date)) => date.clone(),
                    other => {
                        return InternalSnafu {
                            message: format!("row date is not a string: {other:?}"),
                        }
                        .fail();
                    }
                };
                Ok(RawBarRow {
                    date,
                    open: number_at(row, columns.open),
                    high: number_at(row, columns.high),
                    low: number_at(row, columns.low),
                    last: number_at(row, columns.last),
                    mid: number_at(row, columns.mid),
                    volume: number_at(row, columns.volume),
                })
            })
            .collect::<Result<Vec<_>, ProviderError>>()?;

        Ok(RawDataset {
            rows,
            oldest_available_date: self.oldest_available_date.unwrap_or_default(),
            newest_available_date: self.newest_available_date.unwrap_or_default(),
        })
    }
}

/// Best-effort message for a non-success response body.
pub fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<NasdaqErrorResponse>(body) {
        Ok(err) => format!("{}: {}", err.quandl_error.code, err.quandl_error.message),
        Err(_) if body.trim().is_empty() => "Unknown API error".to_string(),
        Err(_) => body.to_string(),
    }
}
