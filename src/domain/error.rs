//! Error types for the tableview crate.
//!
//! This module defines the centralized error type [`TableViewError`] and a type alias
//! [`Result`] for convenient error handling. The view engine itself is total and never
//! fails; these errors come from configuration loading and the command-line front end.

use thiserror::Error;

/// The main error type for tableview operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]` for
/// automatic conversion.
///
/// # Examples
///
/// ```
/// use tableview::TableViewError;
///
/// fn validate_label(label: &str) -> Result<(), TableViewError> {
///     if label.trim().is_empty() {
///         return Err(TableViewError::Config("entity_label must not be blank".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_label(" ").is_err());
/// ```
#[derive(Debug, Error)]
pub enum TableViewError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, such as reading a
    /// configuration file or a data file for the CLI.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML or does not match the expected shape.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Input data could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for tableview operations.
pub type Result<T> = std::result::Result<T, TableViewError>;
