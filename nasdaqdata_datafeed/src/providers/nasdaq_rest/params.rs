use secrecy::{ExposeSecret, SecretString};

use crate::providers::{ProviderError, ValidationSnafu};

/// Checks that a dataset path segment is usable in the request URL.
pub fn validate_path_segment(kind: &str, value: &str) -> Result<(), ProviderError> {
    if value.trim().is_empty() {
        return ValidationSnafu {
            message: format!("{kind} must not be empty"),
        }
        .fail();
    }
    if value.contains(['/', '?', '#']) || value.chars().any(char::is_whitespace) {
        return ValidationSnafu {
            message: format!("{kind} {value:?} contains characters not allowed in a dataset code"),
        }
        .fail();
    }
    Ok(())
}

/// `{base_url}/{exchange}/{symbol}.json`
pub fn dataset_url(base_url: &str, exchange: &str, symbol: &str) -> String {
    format!("{}/{exchange}/{symbol}.json", base_url.trim_end_matches('/'))
}

/// Query string for a dataset request.
pub fn construct_params(api_key: &SecretString) -> Vec<(String, String)> {
    vec![("api_key".to_string(), api_key.expose_secret().to_string())]
}
