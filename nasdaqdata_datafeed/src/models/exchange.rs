use std::fmt;

use serde::{Deserialize, Serialize};

/// Dataset database code, which the host treats as the exchange
/// (e.g. `LBMA`, `WIKI`, `CHRIS`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exchange(String);

impl Exchange {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Exchange {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
