//! NasdaqData datafeed: historical bars from the Nasdaq Data Link REST API,
//! normalized into the host trading framework's bar representation.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod datafeed;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod reporter;
pub mod tz;

pub use datafeed::{Datafeed, NasdaqDataDatafeed};
pub use errors::Error;
