use thiserror::Error;

#[derive(Error, Debug)]
pub enum QmsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month {year}-{month:02}: month must be 1-12 and fit the supported date range")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid month '{0}': expected YYYY-MM")]
    MalformedMonth(String),

    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Unknown facet: {0}")]
    InvalidFacet(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QmsError>;
