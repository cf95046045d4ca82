//! Unit tests for time ranges and series construction

use chrono::NaiveDate;
use tickerscope::models::series::{Bar, Series, TimeRange};

#[test]
fn test_time_range_day_table() {
    let days: Vec<u32> = TimeRange::ALL.iter().map(|r| r.days()).collect();
    assert_eq!(days, vec![1, 5, 7, 30, 90, 180, 365, 1825, 3650]);
}

#[test]
fn test_time_range_parse_is_case_insensitive() {
    assert_eq!("1Y".parse::<TimeRange>(), Ok(TimeRange::OneYear));
    assert_eq!("MAX".parse::<TimeRange>(), Ok(TimeRange::Max));
    assert!("2w".parse::<TimeRange>().is_err());
}

#[test]
fn test_unknown_range_defaults_to_one_month() {
    assert_eq!(TimeRange::parse_or_default("fortnight"), TimeRange::OneMonth);
    assert_eq!(TimeRange::parse_or_default(""), TimeRange::OneMonth);
    assert_eq!(TimeRange::parse_or_default("6m"), TimeRange::SixMonths);
}

#[test]
fn test_time_range_serializes_as_short_code() {
    assert_eq!(serde_json::to_string(&TimeRange::FiveYears).unwrap(), "\"5y\"");
    let parsed: TimeRange = serde_json::from_str("\"1w\"").unwrap();
    assert_eq!(parsed, TimeRange::OneWeek);
}

#[test]
fn test_short_ranges() {
    assert!(TimeRange::OneDay.is_short());
    assert!(TimeRange::OneWeek.is_short());
    assert!(!TimeRange::OneMonth.is_short());
}

#[test]
fn test_bar_is_finite() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    assert!(Bar::new(date, 1.0, 2.0, 0.5, 1.5, 100).is_finite());
    assert!(!Bar::new(date, 1.0, f64::INFINITY, 0.5, 1.5, 100).is_finite());
}

#[test]
fn test_empty_series() {
    let series = Series::new("EMPTY", TimeRange::OneMonth, "test", Vec::new());
    assert!(series.is_empty());
    assert_eq!(series.latest_price(), None);
    assert!(series.last().is_none());
}
