use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] calamine::Error),

    #[error("month must be in 'YYYY-MM' format, got '{0}'")]
    InvalidMonth(String),

    #[error("limit must be 10, 50 or 100, got {0}")]
    InvalidLimit(u32),

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("cannot look back {days} days from {end}")]
    InvalidWindow { end: chrono::NaiveDate, days: i64 },

    #[error("Invalid rate for {currency}: {rate}")]
    InvalidRate { currency: String, rate: f64 },

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SpendError>;
