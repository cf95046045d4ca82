//! Unit tests for the indicator registry and name table

use chrono::{Duration, NaiveDate};
use tickerscope::indicators::{IndicatorCategory, IndicatorError, IndicatorKind};
use tickerscope::models::indicators::{IndicatorBundle, IndicatorOutput};
use tickerscope::models::series::{Bar, Series, TimeRange};

fn create_test_series(count: usize) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = (0..count)
        .map(|i| {
            let price = 75.0 + (i as f64 * 0.2).sin() * 6.0;
            Bar::new(start + Duration::days(i as i64), price, price + 1.0, price - 1.0, price, 2000)
        })
        .collect();
    Series::new("TEST", TimeRange::ThreeMonths, "test", bars)
}

#[test]
fn test_name_table_aliases() {
    let cases = [
        ("sma", IndicatorKind::Sma20),
        ("SMA20", IndicatorKind::Sma20),
        ("sma50", IndicatorKind::Sma50),
        ("ema", IndicatorKind::Ema12),
        ("Ema26", IndicatorKind::Ema26),
        ("bb", IndicatorKind::Bollinger),
        ("Bollinger", IndicatorKind::Bollinger),
        ("MACD", IndicatorKind::Macd),
        ("rsi", IndicatorKind::Rsi),
        ("stochastic", IndicatorKind::Stochastic),
        ("atr", IndicatorKind::Atr),
    ];
    for (name, expected) in cases {
        assert_eq!(name.parse::<IndicatorKind>(), Ok(expected), "{}", name);
    }
}

#[test]
fn test_unknown_name_is_unsupported() {
    assert_eq!(
        "vwap".parse::<IndicatorKind>(),
        Err(IndicatorError::Unsupported("vwap".to_string()))
    );
}

#[test]
fn test_categories() {
    assert_eq!(IndicatorKind::Sma50.category(), IndicatorCategory::Trend);
    assert_eq!(IndicatorKind::Stochastic.category(), IndicatorCategory::Momentum);
    assert_eq!(IndicatorKind::Atr.category(), IndicatorCategory::Volatility);
}

#[test]
fn test_compute_shapes() {
    let series = create_test_series(60);
    for kind in IndicatorKind::ALL {
        let output = kind.compute(&series).unwrap();
        assert_eq!(output.len(), series.len(), "{}", kind);
        match kind {
            IndicatorKind::Macd => assert!(matches!(output, IndicatorOutput::Macd(_))),
            IndicatorKind::Bollinger => assert!(matches!(output, IndicatorOutput::Bollinger(_))),
            IndicatorKind::Stochastic => assert!(matches!(output, IndicatorOutput::Stochastic(_))),
            _ => assert!(matches!(output, IndicatorOutput::Line(_))),
        }
    }
}

#[test]
fn test_bundle_matches_single_indicators() {
    let series = create_test_series(60);
    let bundle = IndicatorBundle::compute(&series).unwrap();
    assert_eq!(
        IndicatorKind::Sma50.compute(&series).unwrap(),
        IndicatorOutput::Line(bundle.sma50.clone())
    );
    assert_eq!(
        IndicatorKind::Macd.compute(&series).unwrap(),
        IndicatorOutput::Macd(bundle.macd.clone())
    );
    assert_eq!(bundle.atr.len(), 60);
}

#[test]
fn test_output_serializes_as_bare_list() {
    let series = create_test_series(3);
    let output = IndicatorKind::Sma20.compute(&series).unwrap();
    let json = serde_json::to_value(&output).unwrap();
    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert!(points[0]["value"].is_null());
    assert!(points[0]["price"].is_number());
    assert_eq!(points[0]["date"], "2024-01-01");
}
