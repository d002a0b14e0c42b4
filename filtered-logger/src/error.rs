use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// The field-name alternation could not be compiled
    #[error("Invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Raised by a record renderer; surfaced unchanged by the formatter
    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
