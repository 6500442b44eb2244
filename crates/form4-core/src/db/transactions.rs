//! Transaction queries

use tracing::info;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::TransactionRecord;

/// Row as returned by SQLite, before validation
struct RawTransaction {
    transaction_date: Option<String>,
    insider_name: Option<String>,
    company_name: Option<String>,
    transaction_code: Option<String>,
    shares: Option<f64>,
    price_per_share: Option<f64>,
    total_value: Option<f64>,
}

impl RawTransaction {
    /// Check the fields the filters need. Shares are left to the aggregation.
    fn validate(self, position: usize) -> Result<TransactionRecord> {
        let insider_name = self.insider_name.ok_or_else(|| {
            Error::DataIntegrity(format!("transaction row {} has no insider name", position))
        })?;
        let company_name = self.company_name.ok_or_else(|| {
            Error::DataIntegrity(format!("transaction row {} has no company name", position))
        })?;

        let raw_date = self.transaction_date.ok_or_else(|| {
            Error::DataIntegrity(format!(
                "transaction row {} ({}, {}) has no transaction date",
                position, insider_name, company_name
            ))
        })?;
        let transaction_date = parse_datetime(&raw_date).ok_or_else(|| {
            Error::DataIntegrity(format!(
                "transaction row {} ({}, {}) has unparseable date '{}'",
                position, insider_name, company_name, raw_date
            ))
        })?;

        Ok(TransactionRecord {
            transaction_date,
            insider_name,
            company_name,
            transaction_code: self.transaction_code,
            shares: self.shares,
            price_per_share: self.price_per_share,
            total_value: self.total_value,
        })
    }
}

impl Database {
    /// Fetch every transaction with insider and issuer names, newest first
    pub fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                t.transaction_date,
                i.name AS insider_name,
                isr.company_name,
                t.transaction_code,
                t.shares,
                t.price_per_share,
                t.total_value
            FROM transactions t
            JOIN insiders i ON t.insider_id = i.insider_id
            JOIN issuers isr ON t.company_id = isr.company_id
            ORDER BY t.transaction_date DESC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawTransaction {
                    transaction_date: row.get(0)?,
                    insider_name: row.get(1)?,
                    company_name: row.get(2)?,
                    transaction_code: row.get(3)?,
                    shares: row.get(4)?,
                    price_per_share: row.get(5)?,
                    total_value: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let transactions = rows
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.validate(i + 1))
            .collect::<Result<Vec<_>>>()?;

        info!(count = transactions.len(), "Fetched transactions");
        Ok(transactions)
    }
}
