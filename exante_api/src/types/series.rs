use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Observations of a single ticker keyed by date or timestamp string, in
/// the order the service sent them.
///
/// `None` is a gap the service reported as `null`.
pub type Series = IndexMap<String, Option<f64>>;

/// Time series keyed by ticker, as returned under `DATA`.
///
/// Ticker and date order follow the response. Equality ignores order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(IndexMap<String, Series>);

impl TimeSeries {
    pub fn get(&self, ticker: &str) -> Option<&Series> {
        self.0.get(ticker)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every date that appears in at least one series, in first-seen order.
    pub fn dates(&self) -> IndexSet<&str> {
        self.0
            .values()
            .flat_map(|series| series.keys().map(String::as_str))
            .collect()
    }

    /// The last `(date, value)` the service sent for a ticker. For
    /// `Data/Last` responses this is the only observation.
    pub fn last_observation(&self, ticker: &str) -> Option<(&str, Option<f64>)> {
        self.0
            .get(ticker)?
            .last()
            .map(|(date, value)| (date.as_str(), *value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Series)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
