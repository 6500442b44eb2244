//! Test utilities for form4-core
//!
//! The dashboard has no write path, so tests seed the source tables with raw
//! SQL through [`Fixture`]. Insiders and issuers are created on first use and
//! looked up by name afterwards.

use rusqlite::{params, OptionalExtension};

use crate::db::Database;

/// Seeds insiders, issuers, transactions and summaries into a database
pub struct Fixture<'db> {
    db: &'db Database,
}

impl<'db> Fixture<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Get or create an insider by name
    pub fn insider(&self, name: &str) -> i64 {
        let conn = self.db.conn().unwrap();
        let existing: Option<i64> = conn
            .query_row(
                "SELECT insider_id FROM insiders WHERE name = ?",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .unwrap();
        if let Some(id) = existing {
            return id;
        }
        conn.execute("INSERT INTO insiders (name) VALUES (?)", params![name])
            .unwrap();
        conn.last_insert_rowid()
    }

    /// Get or create an issuer by company name
    pub fn issuer(&self, company_name: &str) -> i64 {
        let conn = self.db.conn().unwrap();
        let existing: Option<i64> = conn
            .query_row(
                "SELECT company_id FROM issuers WHERE company_name = ?",
                params![company_name],
                |row| row.get(0),
            )
            .optional()
            .unwrap();
        if let Some(id) = existing {
            return id;
        }
        conn.execute(
            "INSERT INTO issuers (company_name) VALUES (?)",
            params![company_name],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    /// Insert a complete trade; total value is shares × price
    pub fn trade(
        &self,
        date: &str,
        insider: &str,
        company: &str,
        code: &str,
        shares: f64,
        price: f64,
    ) -> i64 {
        self.raw_trade(
            date,
            insider,
            company,
            Some(code),
            Some(shares),
            Some(price),
            Some(shares * price),
        )
    }

    /// Insert a trade with any field left NULL
    #[allow(clippy::too_many_arguments)]
    pub fn raw_trade(
        &self,
        date: &str,
        insider: &str,
        company: &str,
        code: Option<&str>,
        shares: Option<f64>,
        price: Option<f64>,
        total: Option<f64>,
    ) -> i64 {
        let insider_id = self.insider(insider);
        let company_id = self.issuer(company);
        let conn = self.db.conn().unwrap();
        conn.execute(
            r#"
            INSERT INTO transactions
                (insider_id, company_id, transaction_date, transaction_code, shares, price_per_share, total_value)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![insider_id, company_id, date, code, shares, price, total],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    /// Insert an AI summary for a company
    pub fn summary(&self, company: &str, text: Option<&str>, date: Option<&str>) -> i64 {
        let company_id = self.issuer(company);
        let conn = self.db.conn().unwrap();
        conn.execute(
            "INSERT INTO ai_summaries (company_id, summary_text, summary_date) VALUES (?, ?, ?)",
            params![company_id, text, date],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    /// The three-trade, two-summary data set used across crates:
    /// Acme 100 + 50 shares, Globex 30 shares; one positive and one
    /// negative Acme summary.
    pub fn seed_scenario(&self) {
        self.trade("2025-01-01", "Jane Doe", "Acme", "P", 100.0, 12.0);
        self.trade("2025-06-01", "John Roe", "Acme", "P", 50.0, 13.5);
        self.trade("2025-06-01", "Ann Lee", "Globex", "S", 30.0, 40.0);
        self.summary("Acme", Some("We recommend a buy"), Some("2025-06-02"));
        self.summary("Acme", Some("Outlook is cautious"), Some("2025-06-01"));
    }
}
