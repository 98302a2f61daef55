//! Provider abstraction for the raw dataset feed.
//!
//! This module defines the [`DataProvider`] trait: fetch one provider dataset
//! (rows plus availability range) for an exchange/symbol pair. The only
//! concrete implementation is [`nasdaq_rest::provider::NasdaqRestProvider`];
//! tests substitute in-memory providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use nasdaqdata_datafeed::models::{exchange::Exchange, raw::RawDataset};
//! use nasdaqdata_datafeed::providers::{DataProvider, ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl DataProvider for EmptyProvider {
//!     async fn fetch_dataset(
//!         &self,
//!         _exchange: &Exchange,
//!         _symbol: &str,
//!     ) -> Result<RawDataset, ProviderError> {
//!         Ok(RawDataset::default())
//!     }
//! }
//! ```

pub mod nasdaq_rest;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{exchange::Exchange, raw::RawDataset};

/// Trait for fetching a raw dataset from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches every available row of the `exchange/symbol` dataset.
    ///
    /// # Returns
    ///
    /// * `Ok(RawDataset)` - Rows as sent by the provider, plus the reported
    ///   oldest/newest available dates.
    /// * `Err(ProviderError)` - On transport, API or decoding failure.
    async fn fetch_dataset(
        &self,
        exchange: &Exchange,
        symbol: &str,
    ) -> Result<RawDataset, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API answered with a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The response body was not the expected JSON document.
    #[snafu(display("Failed to decode provider response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// The response decoded but its contents could not be used.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}
