//! Error types for form4

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Whether the storage backend could not be reached or queried
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Pool(_) | Self::Encryption(_) | Self::Config(_)
        )
    }

    /// Whether a fetched row was missing a field the pipeline needs
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::DataIntegrity(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = Error::DataIntegrity("missing shares".to_string());
        assert!(err.is_data_integrity());
        assert!(!err.is_data_access());

        let err = Error::Database(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.is_data_access());
        assert!(!err.is_data_integrity());

        let err = Error::InvalidData("bad window".to_string());
        assert!(!err.is_data_access());
        assert!(!err.is_data_integrity());
    }

    #[test]
    fn test_error_display() {
        let err = Error::DataIntegrity("transaction row 3 has no shares".to_string());
        assert_eq!(
            err.to_string(),
            "Data integrity error: transaction row 3 has no shares"
        );
    }
}
