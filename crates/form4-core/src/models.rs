//! Domain models for form4

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::sentiment::Sentiment;

/// Sentinel company selector value meaning "no company filter"
pub const ALL_COMPANIES: &str = "All";

/// One insider trade, joined with insider and issuer names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_date: NaiveDateTime,
    pub insider_name: String,
    pub company_name: String,
    /// Single-letter code (P = open-market purchase, S = sale, ...)
    pub transaction_code: Option<String>,
    /// NULL at the source is carried through; aggregation rejects it
    pub shares: Option<f64>,
    pub price_per_share: Option<f64>,
    pub total_value: Option<f64>,
}

/// A precomputed AI summary for an issuer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub company_name: String,
    pub summary_text: Option<String>,
    pub summary_date: Option<NaiveDateTime>,
}

impl SummaryRecord {
    /// Summary text, or "" when the source had none
    pub fn text(&self) -> &str {
        self.summary_text.as_deref().unwrap_or("")
    }
}

/// Company selector: either every company or one exact name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyFilter {
    #[default]
    All,
    Company(String),
}

impl CompanyFilter {
    /// Parse a selector value. "All" (any case) and blank select every company.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_COMPANIES) {
            Self::All
        } else {
            Self::Company(s.to_string())
        }
    }

    /// Whether a row for `company_name` passes this selector
    pub fn matches(&self, company_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Company(name) => name == company_name,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_COMPANIES,
            Self::Company(name) => name,
        }
    }
}

impl From<String> for CompanyFilter {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for CompanyFilter {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<CompanyFilter> for String {
    fn from(filter: CompanyFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl std::fmt::Display for CompanyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How far back transactions are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeWindow {
    #[default]
    AllTime,
    #[serde(rename = "last-7-days")]
    Last7Days,
    #[serde(rename = "last-30-days")]
    Last30Days,
    #[serde(rename = "last-90-days")]
    Last90Days,
}

impl TimeWindow {
    /// Every window, in selector order
    pub const ALL: [TimeWindow; 4] = [
        Self::AllTime,
        Self::Last7Days,
        Self::Last30Days,
        Self::Last90Days,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllTime => "all-time",
            Self::Last7Days => "last-7-days",
            Self::Last30Days => "last-30-days",
            Self::Last90Days => "last-90-days",
        }
    }

    /// Human-readable label used by the selectors
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllTime => "All time",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 90 days",
        }
    }

    /// Window length in days, `None` for all time
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::AllTime => None,
            Self::Last7Days => Some(7),
            Self::Last30Days => Some(30),
            Self::Last90Days => Some(90),
        }
    }

    /// Earliest instant kept by this window, `None` for no lower bound
    pub fn cutoff(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.days().map(|days| now - Duration::days(days))
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "all-time" | "all_time" | "all time" => Ok(Self::AllTime),
            "7" | "7d" | "last-7-days" | "last_7_days" | "last 7 days" => Ok(Self::Last7Days),
            "30" | "30d" | "last-30-days" | "last_30_days" | "last 30 days" => {
                Ok(Self::Last30Days)
            }
            "90" | "90d" | "last-90-days" | "last_90_days" | "last 90 days" => {
                Ok(Self::Last90Days)
            }
            _ => Err(format!(
                "Unknown time window: {}. Available: all-time, last-7-days, last-30-days, last-90-days",
                s
            )),
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selector state for one dashboard request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub company: CompanyFilter,
    pub time_window: TimeWindow,
}

impl FilterCriteria {
    pub fn new(company: CompanyFilter, time_window: TimeWindow) -> Self {
        Self {
            company,
            time_window,
        }
    }

    /// Set the company selector
    pub fn company(mut self, company: impl Into<CompanyFilter>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the time window
    pub fn time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = window;
        self
    }
}

/// Total shares traded for one company in the filtered set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub company_name: String,
    pub total_shares: f64,
}

/// A summary with its keyword sentiment bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSummary {
    #[serde(flatten)]
    pub summary: SummaryRecord,
    pub sentiment: Sentiment,
}

/// Everything one dashboard render needs
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub criteria: FilterCriteria,
    /// Selector options: the `All` sentinel followed by every company seen
    pub companies: Vec<String>,
    pub transactions: Vec<TransactionRecord>,
    pub aggregates: Vec<AggregateEntry>,
    pub summaries: Vec<ClassifiedSummary>,
}

/// Row counts for the status command
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseStats {
    pub insiders: i64,
    pub issuers: i64,
    pub transactions: i64,
    pub summaries: i64,
}
