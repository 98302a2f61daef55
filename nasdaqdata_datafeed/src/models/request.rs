use chrono::{DateTime, TimeZone, Utc};

use crate::models::{exchange::Exchange, interval::Interval};

/// Host framework request for historical bars of one symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRequest {
    /// Dataset code (e.g. `"GOLD"`, `"AAPL"`).
    pub symbol: String,

    /// Database code the dataset lives under.
    pub exchange: Exchange,

    pub interval: Interval,

    /// Start of the requested window (inclusive).
    pub start: DateTime<Utc>,

    /// End of the requested window (inclusive). `None` means up to the newest bar.
    pub end: Option<DateTime<Utc>>,
}

impl HistoryRequest {
    /// Whether a bar opening at `datetime` falls inside the requested window.
    pub fn contains<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> bool {
        let at = datetime.with_timezone(&Utc);
        at >= self.start && self.end.is_none_or(|end| at <= end)
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::Asia::Shanghai;

    use super::*;

    fn request(end: Option<DateTime<Utc>>) -> HistoryRequest {
        HistoryRequest {
            symbol: "GOLD".to_string(),
            exchange: Exchange::new("LBMA"),
            interval: Interval::Daily,
            start: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            end,
        }
    }

    #[test]
    fn window_is_compared_in_utc() {
        let req = request(None);
        // midnight in Shanghai is 16:00 UTC the previous day
        let before = Shanghai.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let inside = Shanghai.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        assert!(!req.contains(&before));
        assert!(req.contains(&inside));
    }

    #[test]
    fn end_is_inclusive() {
        let end = Utc.with_ymd_and_hms(2020, 1, 5, 0, 0, 0).unwrap();
        let req = request(Some(end));
        assert!(req.contains(&end));
        assert!(!req.contains(&(end + chrono::TimeDelta::seconds(1))));
    }
}
