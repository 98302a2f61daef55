use std::str::FromStr;

use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// An optional environment variable is set but could not be parsed.
#[derive(Debug, Error)]
#[error("Invalid value for environment variable {name}: {value:?}")]
pub struct InvalidEnvVarError {
    pub name: String,
    pub value: String,
}

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads and parses an optional environment variable.
///
/// Returns `Ok(None)` when the variable is unset or blank, and an error when it
/// is set to something that does not parse as `T`.
pub fn get_parsed_env_var<T: FromStr>(name: &str) -> Result<Option<T>, InvalidEnvVarError> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value.trim().parse().map(Some).map_err(|_| InvalidEnvVarError {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn missing_var_names_the_variable() {
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_MISSING") };
        let err = get_env_var("SHARED_UTILS_TEST_MISSING").unwrap_err();
        assert_eq!(err.0, "SHARED_UTILS_TEST_MISSING");
        assert!(err.to_string().contains("SHARED_UTILS_TEST_MISSING"));
    }

    #[test]
    #[serial]
    fn parsed_var_handles_unset_blank_and_garbage() {
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_NUM") };
        assert_eq!(get_parsed_env_var::<u64>("SHARED_UTILS_TEST_NUM").unwrap(), None);

        unsafe { std::env::set_var("SHARED_UTILS_TEST_NUM", "  ") };
        assert_eq!(get_parsed_env_var::<u64>("SHARED_UTILS_TEST_NUM").unwrap(), None);

        unsafe { std::env::set_var("SHARED_UTILS_TEST_NUM", "42") };
        assert_eq!(get_parsed_env_var::<u64>("SHARED_UTILS_TEST_NUM").unwrap(), Some(42));

        unsafe { std::env::set_var("SHARED_UTILS_TEST_NUM", "forty-two") };
        let err = get_parsed_env_var::<u64>("SHARED_UTILS_TEST_NUM").unwrap_err();
        assert_eq!(err.value, "forty-two");

        unsafe { std::env::remove_var("SHARED_UTILS_TEST_NUM") };
    }
}
