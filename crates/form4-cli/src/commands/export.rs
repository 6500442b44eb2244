//! Export command implementation

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use form4_core::export::export_transactions;
use form4_core::{Database, ExportFormat, FilterCriteria};

use super::load_transactions;

/// Export filtered transactions to a file, or stdout when no path is given
pub fn cmd_export(
    db: &Database,
    criteria: &FilterCriteria,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let transactions = load_transactions(db, criteria)?;
    let bytes = export_transactions(&transactions, format)
        .with_context(|| format!("Failed to export transactions as {}", format))?;

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            file.write_all(&bytes)?;

            println!(
                "✅ Exported {} transactions to {}",
                transactions.len(),
                path.display()
            );
        }
        None => {
            std::io::stdout()
                .write_all(&bytes)
                .context("Failed to write export to stdout")?;
        }
    }

    Ok(())
}
