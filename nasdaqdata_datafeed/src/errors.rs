use thiserror::Error;

use crate::{
    config::ConfigError,
    models::interval::IntervalError,
    normalize::NormalizeError,
    providers::{ProviderError, ProviderInitError},
};

/// The unified error type for the `nasdaqdata_datafeed` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the data provider (transport, API, decoding).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider could not be constructed.
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// The requested interval has no provider counterpart.
    #[error(transparent)]
    Interval(#[from] IntervalError),

    /// The fetched series could not be normalized.
    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
