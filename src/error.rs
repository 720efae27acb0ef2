use thiserror::Error;

/// Crate level error type.
///
/// Validation itself never fails with this type; rule failures are data in the
/// error tree. These variants cover loading and exporting configuration records.
#[derive(Error, Debug)]
pub enum CobotError {
    /// I/O related failure
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while parsing YAML configuration files
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error while parsing or rendering JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient alias over [`Result`] using [`CobotError`]
pub type Result<T> = std::result::Result<T, CobotError>;
