//! Tabular view of API results.
//!
//! The client returns nested maps; everything that prints or exports goes
//! through a [`Frame`] so the API crate never depends on presentation code.

use exante_api::types::{LastUpdated, Metadata, TimeSeries};
use serde_json::Value;

/// A header row plus string cells, index column first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub trait ToFrame {
    fn to_frame(&self) -> Frame;
}

/// One column per ticker, one row per date. Gaps are left blank.
impl ToFrame for TimeSeries {
    fn to_frame(&self) -> Frame {
        let tickers: Vec<&str> = self.tickers().collect();
        let header = std::iter::once("Date")
            .chain(tickers.iter().copied())
            .map(String::from)
            .collect();

        let rows = self
            .dates()
            .into_iter()
            .map(|date| {
                let mut row = vec![date.to_string()];
                row.extend(tickers.iter().map(|ticker| {
                    self.get(ticker)
                        .and_then(|series| series.get(date).copied().flatten())
                        .map(format_observation)
                        .unwrap_or_default()
                }));
                row
            })
            .collect();

        Frame { header, rows }
    }
}

/// One column per ticker, one row per attribute name.
impl ToFrame for Metadata {
    fn to_frame(&self) -> Frame {
        let tickers: Vec<&str> = self.tickers().collect();
        let header = std::iter::once("Field")
            .chain(tickers.iter().copied())
            .map(String::from)
            .collect();

        let rows = self
            .attribute_names()
            .into_iter()
            .map(|name| {
                let mut row = vec![name.to_string()];
                row.extend(tickers.iter().map(|ticker| {
                    self.attribute(ticker, name)
                        .map(format_attribute)
                        .unwrap_or_default()
                }));
                row
            })
            .collect();

        Frame { header, rows }
    }
}

impl ToFrame for LastUpdated {
    fn to_frame(&self) -> Frame {
        Frame {
            header: vec!["Ticker".to_string(), "UPDATED".to_string()],
            rows: self
                .iter()
                .map(|(ticker, ts)| vec![ticker.to_string(), ts.to_string()])
                .collect(),
        }
    }
}

// Debug keeps the trailing `.0` on whole numbers.
fn format_observation(value: f64) -> String {
    format!("{:?}", value)
}

fn format_attribute(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
