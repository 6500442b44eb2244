//! Integration tests for form4-core
//!
//! These tests exercise the full fetch → filter → aggregate → classify →
//! export workflow against a seeded database.

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use form4_core::{
    build_dashboard,
    export::{transactions_to_csv, CSV_COLUMNS},
    test_utils::Fixture,
    CompanyFilter, Database, FilterCriteria, Sentiment, TimeWindow,
};

fn seeded_db() -> Database {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    Fixture::new(&db).seed_scenario();
    db
}

fn june_tenth() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[test]
fn test_all_companies_all_time() {
    let db = seeded_db();
    let transactions = db.fetch_transactions().unwrap();
    let summaries = db.fetch_summaries().unwrap();

    let dashboard = build_dashboard(
        &transactions,
        &summaries,
        &FilterCriteria::default(),
        june_tenth(),
    )
    .unwrap();

    assert_eq!(dashboard.transactions, transactions);
    assert_eq!(dashboard.aggregates.len(), 2);
    assert_eq!(dashboard.aggregates[0].company_name, "Acme");
    assert_eq!(dashboard.aggregates[0].total_shares, 150.0);
    assert_eq!(dashboard.aggregates[1].company_name, "Globex");
    assert_eq!(dashboard.aggregates[1].total_shares, 30.0);

    // Newest-first fetch puts the June companies first
    assert_eq!(dashboard.companies[0], "All");
    assert_eq!(dashboard.companies.len(), 3);
}

#[test]
fn test_single_company_filter() {
    let db = seeded_db();
    let criteria = FilterCriteria::new(
        CompanyFilter::Company("Acme".to_string()),
        TimeWindow::AllTime,
    );

    let dashboard = build_dashboard(
        &db.fetch_transactions().unwrap(),
        &db.fetch_summaries().unwrap(),
        &criteria,
        june_tenth(),
    )
    .unwrap();

    assert_eq!(dashboard.transactions.len(), 2);
    assert_eq!(dashboard.aggregates.len(), 1);
    assert_eq!(dashboard.aggregates[0].total_shares, 150.0);

    let sentiments: Vec<_> = dashboard.summaries.iter().map(|s| s.sentiment).collect();
    assert_eq!(sentiments, vec![Sentiment::Positive, Sentiment::Negative]);
}

#[test]
fn test_window_does_not_filter_summaries() {
    let db = seeded_db();
    let criteria = FilterCriteria::default().time_window(TimeWindow::Last7Days);

    let dashboard = build_dashboard(
        &db.fetch_transactions().unwrap(),
        &db.fetch_summaries().unwrap(),
        &criteria,
        june_tenth(),
    )
    .unwrap();

    assert!(dashboard.transactions.is_empty());
    assert!(dashboard.aggregates.is_empty());
    assert_eq!(dashboard.summaries.len(), 2);
}

#[test]
fn test_recent_trades_with_real_clock() {
    let db = Database::in_memory().unwrap();
    let fixture = Fixture::new(&db);
    let now = Utc::now().naive_utc();
    let fmt = "%Y-%m-%d %H:%M:%S";

    fixture.trade(
        &(now - Duration::days(2)).format(fmt).to_string(),
        "Jane Doe",
        "Acme",
        "P",
        10.0,
        1.0,
    );
    fixture.trade(
        &(now - Duration::days(45)).format(fmt).to_string(),
        "Jane Doe",
        "Acme",
        "P",
        20.0,
        1.0,
    );
    fixture.trade(
        &(now - Duration::days(200)).format(fmt).to_string(),
        "Jane Doe",
        "Acme",
        "P",
        40.0,
        1.0,
    );

    let transactions = db.fetch_transactions().unwrap();
    let total = |window: TimeWindow| {
        let criteria = FilterCriteria::default().time_window(window);
        build_dashboard(&transactions, &[], &criteria, now)
            .unwrap()
            .aggregates
            .first()
            .map(|a| a.total_shares)
            .unwrap_or(0.0)
    };

    assert_eq!(total(TimeWindow::Last7Days), 10.0);
    assert_eq!(total(TimeWindow::Last30Days), 10.0);
    assert_eq!(total(TimeWindow::Last90Days), 30.0);
    assert_eq!(total(TimeWindow::AllTime), 70.0);
}

#[test]
fn test_null_shares_aborts_dashboard() {
    let db = seeded_db();
    Fixture::new(&db).raw_trade("2025-06-05", "Gift Giver", "Acme", Some("G"), None, None, None);

    let err = build_dashboard(
        &db.fetch_transactions().unwrap(),
        &db.fetch_summaries().unwrap(),
        &FilterCriteria::default(),
        june_tenth(),
    )
    .unwrap_err();

    assert!(err.is_data_integrity());
    assert!(err.to_string().contains("Gift Giver"));
}

#[test]
fn test_export_filtered_rows() {
    let db = seeded_db();
    let criteria = FilterCriteria::default().company("Globex");

    let dashboard = build_dashboard(
        &db.fetch_transactions().unwrap(),
        &db.fetch_summaries().unwrap(),
        &criteria,
        june_tenth(),
    )
    .unwrap();

    let csv = String::from_utf8(transactions_to_csv(&dashboard.transactions).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], CSV_COLUMNS.join(","));
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Ann Lee"));
    assert!(lines[1].contains("Globex"));
    assert!(!csv.contains("Acme"));
}
