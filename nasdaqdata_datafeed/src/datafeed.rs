//! The host framework's datafeed plugin interface and its NasdaqData
//! implementation.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    config::DatafeedSettings,
    errors::Error,
    models::{bar::NormalizedBar, interval::IntervalSpec, request::HistoryRequest},
    normalize::BarSeriesNormalizer,
    providers::{DataProvider, nasdaq_rest::provider::NasdaqRestProvider},
    reporter::Reporter,
};

/// Plugin contract the host framework drives.
#[async_trait]
pub trait Datafeed {
    /// Checks credentials. Returns `true` once initialised; repeat calls are no-ops.
    fn init(&mut self, reporter: &dyn Reporter) -> bool;

    /// Fetches bars for `req`. Initialises first if needed; an init failure
    /// yields an empty result rather than an error.
    async fn query_bar_history(
        &mut self,
        req: &HistoryRequest,
        reporter: &dyn Reporter,
    ) -> Result<Vec<NormalizedBar>, Error>;
}

pub struct NasdaqDataDatafeed<P = NasdaqRestProvider> {
    settings: DatafeedSettings,
    provider: P,
    normalizer: BarSeriesNormalizer,
    inited: bool,
}

impl NasdaqDataDatafeed<NasdaqRestProvider> {
    pub fn new(settings: DatafeedSettings) -> Result<Self, Error> {
        let provider = NasdaqRestProvider::new(&settings)?;
        Ok(Self::with_provider(settings, provider))
    }
}

impl<P: DataProvider> NasdaqDataDatafeed<P> {
    pub fn with_provider(settings: DatafeedSettings, provider: P) -> Self {
        Self {
            settings,
            provider,
            normalizer: BarSeriesNormalizer::default(),
            inited: false,
        }
    }

    pub fn with_normalizer(mut self, normalizer: BarSeriesNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn is_inited(&self) -> bool {
        self.inited
    }
}

#[async_trait]
impl<P: DataProvider> Datafeed for NasdaqDataDatafeed<P> {
    fn init(&mut self, reporter: &dyn Reporter) -> bool {
        if self.inited {
            return true;
        }

        if !self.settings.has_username() {
            reporter.report("NasdaqData datafeed init failed: username is empty!");
            return false;
        }

        if !self.settings.has_password() {
            reporter.report("NasdaqData datafeed init failed: password is empty!");
            return false;
        }

        debug!(username = %self.settings.username, "datafeed initialised");
        self.inited = true;
        true
    }

    async fn query_bar_history(
        &mut self,
        req: &HistoryRequest,
        reporter: &dyn Reporter,
    ) -> Result<Vec<NormalizedBar>, Error> {
        if !self.inited && !self.init(reporter) {
            return Ok(Vec::new());
        }

        let interval = IntervalSpec::try_from(req.interval)?;
        info!(
            symbol = %req.symbol,
            exchange = %req.exchange,
            interval = interval.provider_code(),
            "querying bar history"
        );

        let dataset = self
            .provider
            .fetch_dataset(&req.exchange, &req.symbol)
            .await?;
        if dataset.rows.is_empty() {
            debug!(symbol = %req.symbol, "provider returned no rows");
            return Ok(Vec::new());
        }

        let bounds = dataset.bounds()?;
        let bars = self.normalizer.normalize(
            &dataset.rows,
            bounds,
            interval,
            &req.symbol,
            &req.exchange,
        )?;

        // trim after filling so the first in-window days can borrow earlier values
        let normalized = bars.len();
        let bars: Vec<NormalizedBar> = bars
            .into_iter()
            .filter(|bar| req.contains(&bar.datetime))
            .collect();

        info!(
            symbol = %req.symbol,
            normalized,
            returned = bars.len(),
            "bar history ready"
        );
        Ok(bars)
    }
}
