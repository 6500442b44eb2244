//! AI summary command

use anyhow::{Context, Result};
use form4_core::engine::classify_summaries;
use form4_core::{
    filter_summaries, ClassifiedSummary, CompanyFilter, Database, FilterCriteria, Sentiment,
};

pub fn cmd_summaries(db: &Database, company: &str) -> Result<()> {
    let summaries = db.fetch_summaries().context("Failed to fetch summaries")?;
    let criteria = FilterCriteria::default().company(CompanyFilter::parse(company));
    let classified = classify_summaries(filter_summaries(&summaries, &criteria));

    println!();
    println!("🧠 AI Generated Company Summaries ({})", criteria.company);
    print_summaries(&classified);

    Ok(())
}

pub fn print_summaries(summaries: &[ClassifiedSummary]) {
    println!("   ─────────────────────────────────────────────────────────────");

    if summaries.is_empty() {
        println!("   No summaries available.");
        return;
    }

    for summary in summaries {
        println!("   {}", format_summary_line(summary));
        println!();
    }
}

/// "**Company:** text", green when positive and red when negative
pub fn format_summary_line(summary: &ClassifiedSummary) -> String {
    let color = match summary.sentiment {
        Sentiment::Positive => "\x1b[32m",
        Sentiment::Negative => "\x1b[31m",
    };
    let date = summary
        .summary
        .summary_date
        .map(|d| format!(" \x1b[2m({})\x1b[0m", d.format("%Y-%m-%d")))
        .unwrap_or_default();

    format!(
        "{}**{}:** {}\x1b[0m{}",
        color,
        summary.summary.company_name,
        summary.summary.text(),
        date
    )
}
