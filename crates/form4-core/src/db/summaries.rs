//! AI summary queries

use tracing::{info, warn};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::SummaryRecord;

impl Database {
    /// Fetch every AI summary with its issuer name, newest first
    pub fn fetch_summaries(&self) -> Result<Vec<SummaryRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                isr.company_name,
                a.summary_text,
                a.summary_date
            FROM ai_summaries a
            JOIN issuers isr ON a.company_id = isr.company_id
            ORDER BY a.summary_date DESC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut summaries = Vec::with_capacity(rows.len());
        for (i, (company_name, summary_text, summary_date)) in rows.into_iter().enumerate() {
            // Company is the only field the summary filter reads
            let company_name = company_name.ok_or_else(|| {
                Error::DataIntegrity(format!("summary row {} has no company name", i + 1))
            })?;

            let summary_date = summary_date.and_then(|raw| {
                let parsed = parse_datetime(&raw);
                if parsed.is_none() {
                    warn!(company = %company_name, date = %raw, "Unparseable summary date");
                }
                parsed
            });

            summaries.push(SummaryRecord {
                company_name,
                summary_text,
                summary_date,
            });
        }

        info!(count = summaries.len(), "Fetched summaries");
        Ok(summaries)
    }
}
