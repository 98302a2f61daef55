//! Nasdaq Data Link (formerly Quandl) dataset REST API.

pub mod params;
pub mod provider;
pub mod response;
