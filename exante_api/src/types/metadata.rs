use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attributes of one ticker, in the order the service sent them.
pub type Attributes = IndexMap<String, Value>;

/// Descriptive attributes keyed by ticker, as returned under `METADATA`.
///
/// Attribute names and value types are defined by the service, so values
/// stay as raw JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, Attributes>);

impl Metadata {
    pub fn get(&self, ticker: &str) -> Option<&Attributes> {
        self.0.get(ticker)
    }

    pub fn attribute(&self, ticker: &str, name: &str) -> Option<&Value> {
        self.0.get(ticker)?.get(name)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every attribute name reported for at least one ticker, in first-seen
    /// order.
    pub fn attribute_names(&self) -> IndexSet<&str> {
        self.0
            .values()
            .flat_map(|attrs| attrs.keys().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Last-updated timestamps keyed by ticker, as returned under `UPDATED`.
///
/// Timestamps are kept in the service's own format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LastUpdated(IndexMap<String, String>);

impl LastUpdated {
    pub fn get(&self, ticker: &str) -> Option<&str> {
        self.0.get(ticker).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
