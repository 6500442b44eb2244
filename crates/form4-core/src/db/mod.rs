//! Database access layer with connection pooling
//!
//! The dashboard only ever reads. This module is organized by query:
//! - `transactions` - insider trades joined with insider and issuer names
//! - `summaries` - AI summaries joined with issuer names
//!
//! Each fetch checks a connection out of the pool and hands it back when the
//! call returns, on success and on error alike. The two fetches are not run
//! in one transaction and may observe slightly different snapshots.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::models::DatabaseStats;

mod summaries;
mod transactions;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Derive an encryption key from a passphrase using Argon2
///
/// Uses a fixed application salt so the same passphrase always produces the same key,
/// regardless of database path. This allows moving/renaming/restoring the database freely.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Changing this would invalidate all existing encrypted databases
    const APP_SALT: &[u8; 16] = b"form4-salt-v1-xx";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    let hash_str = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(hash_str.as_bytes()))
}

/// Parse a stored date or date-time string.
///
/// Date-only values become midnight of that day.
pub(crate) fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    encrypted: bool,
}

impl Database {
    /// Open the database described by `settings`
    pub fn open(settings: &Settings) -> Result<Self> {
        let path = settings.db_path.to_str().ok_or_else(|| {
            Error::Config(format!(
                "Database path is not valid UTF-8: {}",
                settings.db_path.display()
            ))
        })?;
        Self::new_with_key(path, settings.db_key.as_deref())
    }

    /// Open an unencrypted database
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Open a database with an optional encryption passphrase
    ///
    /// Does not create or alter any table; see [`Database::initialize_schema`].
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);

        let pool = if let Some(pass) = passphrase {
            let key = derive_key(pass)?;
            let key_pragma = format!("PRAGMA key = 'x\"{}\"';", key);

            // Use with_init to set the key on every new connection
            let manager = manager.with_init(move |conn| {
                conn.execute_batch(&key_pragma)?;
                Ok(())
            });

            Pool::builder().max_size(4).build(manager)?
        } else {
            Pool::builder().max_size(4).build(manager)?
        };

        info!(path, encrypted = passphrase.is_some(), "Opened database");

        Ok(Self {
            pool,
            db_path: path.to_string(),
            encrypted: passphrase.is_some(),
        })
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Whether a passphrase was supplied when opening
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Create a fresh, schema-initialized database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because SQLCipher
    /// has issues with in-memory databases in the connection pool.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "form4_test_{}_{}.db",
            std::process::id(),
            id
        ));
        let _ = std::fs::remove_file(&path);

        let db = Self::new_unencrypted(&path.to_string_lossy())?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Row counts for each source table
    pub fn stats(&self) -> Result<DatabaseStats> {
        let conn = self.conn()?;
        let count = |table: &str| -> Result<i64> {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?)
        };

        Ok(DatabaseStats {
            insiders: count("insiders")?,
            issuers: count("issuers")?,
            transactions: count("transactions")?,
            summaries: count("ai_summaries")?,
        })
    }

    /// Create the source tables if they do not exist
    ///
    /// The tables are populated by an external ingestion process; this only
    /// gives a new database the layout the dashboard queries expect.
    pub fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            -- Reporting insiders (officers, directors, 10% owners)
            CREATE TABLE IF NOT EXISTS insiders (
                insider_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Issuers (companies whose securities are traded)
            CREATE TABLE IF NOT EXISTS issuers (
                company_id INTEGER PRIMARY KEY,
                company_name TEXT NOT NULL,
                ticker TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Reported trades
            CREATE TABLE IF NOT EXISTS transactions (
                transaction_id INTEGER PRIMARY KEY,
                insider_id INTEGER NOT NULL REFERENCES insiders(insider_id),
                company_id INTEGER NOT NULL REFERENCES issuers(company_id),
                transaction_date DATETIME NOT NULL,
                transaction_code TEXT,                 -- P = purchase, S = sale, ...
                shares REAL,
                price_per_share REAL,
                total_value REAL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(transaction_date);
            CREATE INDEX IF NOT EXISTS idx_transactions_company ON transactions(company_id);
            CREATE INDEX IF NOT EXISTS idx_transactions_insider ON transactions(insider_id);

            -- Precomputed AI summaries per issuer
            CREATE TABLE IF NOT EXISTS ai_summaries (
                summary_id INTEGER PRIMARY KEY,
                company_id INTEGER NOT NULL REFERENCES issuers(company_id),
                summary_text TEXT,
                summary_date DATETIME,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_ai_summaries_date ON ai_summaries(summary_date);
            CREATE INDEX IF NOT EXISTS idx_ai_summaries_company ON ai_summaries(company_id);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}
