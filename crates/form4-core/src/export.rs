//! Export of the filtered transaction table
//!
//! Supports:
//! - CSV: UTF-8, comma-separated, one header row, exactly the rows given,
//!   columns in record order
//! - JSON: the same rows as an array of objects

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::TransactionRecord;

/// File name offered for downloads
pub const EXPORT_FILE_NAME: &str = "insider_transactions.csv";

/// Date format for CSV cells; `%.f` adds fractional seconds only when present
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// CSV header, in record column order
pub const CSV_COLUMNS: [&str; 7] = [
    "transaction_date",
    "insider_name",
    "company_name",
    "transaction_code",
    "shares",
    "price_per_share",
    "total_value",
];

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    /// Download file name for this format
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Csv => EXPORT_FILE_NAME,
            Self::Json => "insider_transactions.json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {}. Available: csv, json", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One CSV line; NULLs become empty cells
#[derive(Serialize)]
struct CsvRow<'a> {
    transaction_date: String,
    insider_name: &'a str,
    company_name: &'a str,
    transaction_code: Option<&'a str>,
    shares: Option<f64>,
    price_per_share: Option<f64>,
    total_value: Option<f64>,
}

impl<'a> From<&'a TransactionRecord> for CsvRow<'a> {
    fn from(tx: &'a TransactionRecord) -> Self {
        Self {
            transaction_date: tx.transaction_date.format(CSV_DATE_FORMAT).to_string(),
            insider_name: &tx.insider_name,
            company_name: &tx.company_name,
            transaction_code: tx.transaction_code.as_deref(),
            shares: tx.shares,
            price_per_share: tx.price_per_share,
            total_value: tx.total_value,
        }
    }
}

/// Render transactions as CSV bytes
pub fn transactions_to_csv(transactions: &[TransactionRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Written explicitly so an empty export still carries its header
    writer.write_record(CSV_COLUMNS)?;
    for tx in transactions {
        writer.serialize(CsvRow::from(tx))?;
    }
    writer.flush()?;

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    debug!(rows = transactions.len(), bytes = bytes.len(), "Exported transactions to CSV");
    Ok(bytes)
}

/// Render transactions as a JSON array
pub fn transactions_to_json(transactions: &[TransactionRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(transactions)?)
}

/// Render transactions in the requested format
pub fn export_transactions(
    transactions: &[TransactionRecord],
    format: ExportFormat,
) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => transactions_to_csv(transactions),
        ExportFormat::Json => transactions_to_json(transactions),
    }
}
