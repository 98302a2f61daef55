use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use secrecy::SecretString;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    config::DatafeedSettings,
    models::{exchange::Exchange, raw::RawDataset},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, DecodeSnafu, ProviderError, ProviderInitError,
        ReqwestSnafu,
        nasdaq_rest::{
            params::{construct_params, dataset_url, validate_path_segment},
            response::{NasdaqResponse, api_error_message},
        },
    },
};

pub struct NasdaqRestProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    limiter: DefaultDirectRateLimiter,
}

impl NasdaqRestProvider {
    /// Creates a new Nasdaq Data Link provider.
    ///
    /// The datafeed password doubles as the API key.
    pub fn new(settings: &DatafeedSettings) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key(),
            limiter: RateLimiter::direct(Quota::per_second(settings.requests_per_second)),
        })
    }
}

#[async_trait]
impl DataProvider for NasdaqRestProvider {
    async fn fetch_dataset(
        &self,
        exchange: &Exchange,
        symbol: &str,
    ) -> Result<RawDataset, ProviderError> {
        validate_path_segment("exchange", exchange.as_str())?;
        validate_path_segment("symbol", symbol)?;

        self.limiter.until_ready().await;

        let url = dataset_url(&self.base_url, exchange.as_str(), symbol);
        debug!(%url, "requesting dataset");

        let response = self
            .client
            .get(&url)
            .query(&construct_params(&self.api_key))
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        if !status.is_success() {
            return ApiSnafu {
                status: status.as_u16(),
                message: api_error_message(&body),
            }
            .fail();
        }

        let parsed: NasdaqResponse = serde_json::from_str(&body).context(DecodeSnafu)?;
        let dataset = parsed.dataset.into_raw_dataset()?;
        debug!(
            %exchange,
            symbol,
            rows = dataset.rows.len(),
            oldest = %dataset.oldest_available_date,
            newest = %dataset.newest_available_date,
            "decoded dataset"
        );

        Ok(dataset)
    }
}
