use thiserror::Error;

/// An environment variable required by the application is not set (or is blank).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Values that are empty after trimming are treated as missing, so an
/// `export POLYGON_API_KEY=` line in a shell profile does not count as a key.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    lookup_env_var(name).ok_or_else(|| MissingEnvVarError(name.to_string()))
}

/// Reads an optional environment variable.
///
/// Returns `None` for unset, non-unicode, or blank values.
pub fn lookup_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
