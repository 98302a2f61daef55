use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::{America::Havana, Asia::Shanghai};
use nasdaqdata_datafeed::{
    Datafeed, Error, NasdaqDataDatafeed,
    config::DatafeedSettings,
    models::{
        exchange::Exchange,
        interval::{Interval, IntervalError},
        raw::{RawBarRow, RawDataset},
        request::HistoryRequest,
    },
    normalize::{BarSeriesNormalizer, NormalizeError},
    providers::{DataProvider, ProviderError, ValidationSnafu},
    tz::{DstPolicy, LocalTimeError},
};

struct StaticProvider {
    dataset: RawDataset,
    calls: Arc<AtomicUsize>,
}

impl StaticProvider {
    fn new(dataset: RawDataset) -> Self {
        Self {
            dataset,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl DataProvider for StaticProvider {
    async fn fetch_dataset(
        &self,
        _exchange: &Exchange,
        _symbol: &str,
    ) -> Result<RawDataset, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.dataset.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl DataProvider for FailingProvider {
    async fn fetch_dataset(
        &self,
        _exchange: &Exchange,
        symbol: &str,
    ) -> Result<RawDataset, ProviderError> {
        ValidationSnafu {
            message: format!("unknown dataset {symbol}"),
        }
        .fail()
    }
}

#[derive(Default)]
struct Collected(Mutex<Vec<String>>);

impl nasdaqdata_datafeed::reporter::Reporter for Collected {
    fn report(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

impl Collected {
    fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

fn row(date: &str, mid: f64, high: f64, low: f64, last: f64, volume: f64) -> RawBarRow {
    RawBarRow {
        date: date.to_string(),
        open: None,
        high: Some(high),
        low: Some(low),
        last: Some(last),
        mid: Some(mid),
        volume: Some(volume),
    }
}

fn dataset(rows: Vec<RawBarRow>, oldest: &str, newest: &str) -> RawDataset {
    RawDataset {
        rows,
        oldest_available_date: oldest.to_string(),
        newest_available_date: newest.to_string(),
    }
}

fn request(interval: Interval, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> HistoryRequest {
    HistoryRequest {
        symbol: "GOLD".to_string(),
        exchange: Exchange::new("LBMA"),
        interval,
        start,
        end,
    }
}

fn everything() -> HistoryRequest {
    request(Interval::Daily, DateTime::<Utc>::MIN_UTC, None)
}

fn settings() -> DatafeedSettings {
    DatafeedSettings::new("alice", "api-key")
}

#[tokio::test]
async fn init_rejects_blank_username() {
    let mut feed = NasdaqDataDatafeed::with_provider(
        DatafeedSettings::new("", "api-key"),
        StaticProvider::new(RawDataset::default()),
    );
    let reporter = Collected::default();

    assert!(!feed.init(&reporter));
    assert!(!feed.is_inited());
    assert_eq!(
        reporter.messages(),
        vec!["NasdaqData datafeed init failed: username is empty!".to_string()]
    );
}

#[tokio::test]
async fn init_rejects_blank_password() {
    let mut feed = NasdaqDataDatafeed::with_provider(
        DatafeedSettings::new("alice", " "),
        StaticProvider::new(RawDataset::default()),
    );
    let reporter = Collected::default();

    assert!(!feed.init(&reporter));
    assert_eq!(
        reporter.messages(),
        vec!["NasdaqData datafeed init failed: password is empty!".to_string()]
    );
}

#[tokio::test]
async fn init_is_idempotent() {
    let mut feed =
        NasdaqDataDatafeed::with_provider(settings(), StaticProvider::new(RawDataset::default()));
    let reporter = Collected::default();

    assert!(feed.init(&reporter));
    assert!(feed.init(&reporter));
    assert!(reporter.messages().is_empty());
}

#[tokio::test]
async fn query_without_credentials_returns_nothing_and_skips_fetch() {
    let provider = StaticProvider::new(dataset(
        vec![row("2020-01-01", 10.0, 11.0, 9.0, 10.0, 100.0)],
        "2020-01-01",
        "2020-01-01",
    ));
    let calls = Arc::clone(&provider.calls);
    let mut feed = NasdaqDataDatafeed::with_provider(DatafeedSettings::new("", ""), provider);
    let reporter = Collected::default();

    let bars = feed.query_bar_history(&everything(), &reporter).await.unwrap();

    assert!(bars.is_empty());
    assert_eq!(reporter.messages().len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn daily_scenario_fills_every_calendar_day() {
    let provider = StaticProvider::new(dataset(
        vec![row("2020-01-01", 10.0, 11.0, 9.0, 10.0, 100.0)],
        "2020-01-01",
        "2020-01-03",
    ));
    let calls = Arc::clone(&provider.calls);
    let mut feed = NasdaqDataDatafeed::with_provider(settings(), provider);

    let bars = feed
        .query_bar_history(&everything(), &Collected::default())
        .await
        .unwrap();

    assert!(feed.is_inited());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(bars.len(), 3);
    for (bar, day) in bars.iter().zip(1..=3) {
        assert_eq!(
            bar.datetime,
            Shanghai.with_ymd_and_hms(2020, 1, day, 0, 0, 0).unwrap()
        );
        assert_eq!(bar.open_price, 10.0);
        assert_eq!(bar.high_price, 11.0);
        assert_eq!(bar.low_price, 9.0);
        assert_eq!(bar.close_price, 10.0);
        assert_eq!(bar.volume, 100.0);
        assert_eq!(bar.interval, Interval::Daily);
        assert_eq!(bar.exchange, Exchange::new("LBMA"));
        assert_eq!(bar.gateway_name, "NASDAQDATA");
    }
}

#[tokio::test]
async fn window_is_applied_after_forward_fill() {
    // provider is silent from the 2nd to the 4th; the window starts on the 3rd
    let mut feed = NasdaqDataDatafeed::with_provider(
        settings(),
        StaticProvider::new(dataset(
            vec![
                row("2020-01-05", 50.0, 51.0, 49.0, 50.0, 500.0),
                row("2020-01-01", 10.0, 11.0, 9.0, 10.0, 100.0),
            ],
            "2020-01-01",
            "2020-01-05",
        )),
    );
    let start = Shanghai
        .with_ymd_and_hms(2020, 1, 3, 0, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    let end = Shanghai
        .with_ymd_and_hms(2020, 1, 4, 0, 0, 0)
        .unwrap()
        .with_timezone(&Utc);

    let bars = feed
        .query_bar_history(&request(Interval::Daily, start, Some(end)), &Collected::default())
        .await
        .unwrap();

    let days: Vec<NaiveDate> = bars.iter().map(|bar| bar.datetime.date_naive()).collect();
    assert_eq!(
        days,
        vec![
            NaiveDate::from_ymd_opt(2020, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 4).unwrap(),
        ]
    );
    assert!(bars.iter().all(|bar| bar.close_price == 10.0));
}

#[tokio::test]
async fn unsupported_interval_is_an_error() {
    let provider = StaticProvider::new(RawDataset::default());
    let mut feed = NasdaqDataDatafeed::with_provider(settings(), provider);

    let err = feed
        .query_bar_history(
            &request(Interval::Weekly, DateTime::<Utc>::MIN_UTC, None),
            &Collected::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Interval(IntervalError::Unsupported(Interval::Weekly))
    ));
}

#[tokio::test]
async fn empty_dataset_is_not_an_error() {
    let mut feed = NasdaqDataDatafeed::with_provider(
        settings(),
        StaticProvider::new(dataset(vec![], "", "")),
    );

    let bars = feed
        .query_bar_history(&everything(), &Collected::default())
        .await
        .unwrap();
    assert!(bars.is_empty());
}

#[tokio::test]
async fn malformed_bounds_are_an_error() {
    let mut feed = NasdaqDataDatafeed::with_provider(
        settings(),
        StaticProvider::new(dataset(
            vec![row("2020-01-01", 10.0, 11.0, 9.0, 10.0, 100.0)],
            "2020-01-01",
            "soon",
        )),
    );

    let err = feed
        .query_bar_history(&everything(), &Collected::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Normalize(NormalizeError::InvalidDate { .. })
    ));
}

#[tokio::test]
async fn provider_errors_propagate() {
    let mut feed = NasdaqDataDatafeed::with_provider(settings(), FailingProvider);

    let err = feed
        .query_bar_history(&everything(), &Collected::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Provider(ProviderError::Validation { .. })
    ));
    assert!(err.to_string().contains("unknown dataset GOLD"));
}

// Havana springs forward at midnight, so 2020-03-08 00:00 never happened there.
fn havana_spring_forward() -> RawDataset {
    dataset(
        vec![row("2020-03-07", 10.0, 11.0, 9.0, 10.0, 100.0)],
        "2020-03-07",
        "2020-03-08",
    )
}

#[tokio::test]
async fn strict_normalizer_rejects_skipped_midnight() {
    let mut feed = NasdaqDataDatafeed::with_provider(
        settings(),
        StaticProvider::new(havana_spring_forward()),
    )
    .with_normalizer(BarSeriesNormalizer::new(Havana, DstPolicy::Strict));

    let err = feed
        .query_bar_history(&everything(), &Collected::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Normalize(NormalizeError::LocalTime(LocalTimeError::Nonexistent { .. }))
    ));
}

#[tokio::test]
async fn lenient_normalizer_shifts_skipped_midnight() {
    let mut feed = NasdaqDataDatafeed::with_provider(
        settings(),
        StaticProvider::new(havana_spring_forward()),
    )
    .with_normalizer(BarSeriesNormalizer::new(Havana, DstPolicy::Lenient));

    let bars = feed
        .query_bar_history(&everything(), &Collected::default())
        .await
        .unwrap();

    let stamps: Vec<_> = bars.iter().map(|bar| bar.datetime).collect();
    assert_eq!(
        stamps,
        vec![
            Havana.with_ymd_and_hms(2020, 3, 7, 0, 0, 0).unwrap(),
            Havana.with_ymd_and_hms(2020, 3, 8, 1, 0, 0).unwrap(),
        ]
    );
}
