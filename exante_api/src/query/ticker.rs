use std::fmt;

use super::common::{Field, Query, WireFormat};

/// A ticker expression as understood by the service.
///
/// Several tickers are separated by commas and `%` acts as a wildcard.
/// The expression is passed through untouched; the service validates it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickerQuery {
    expression: String,
}

impl TickerQuery {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    /// Joins several tickers into one comma-separated expression.
    pub fn from_tickers<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tickers
            .into_iter()
            .fold(Self::default(), |query, ticker| query.with_ticker(ticker.as_ref()))
    }

    /// Appends another ticker (or pattern) to the expression.
    pub fn with_ticker(mut self, ticker: &str) -> Self {
        if !self.expression.is_empty() {
            self.expression.push(',');
        }
        self.expression.push_str(ticker);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// True when the expression contains the `%` wildcard.
    pub fn is_pattern(&self) -> bool {
        self.expression.contains('%')
    }
}

impl Query for TickerQuery {
    fn fields(&self, _format: WireFormat) -> Vec<Field> {
        vec![("ticker", Some(self.expression.clone()))]
    }
}

impl From<&str> for TickerQuery {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}

impl From<String> for TickerQuery {
    fn from(expression: String) -> Self {
        Self::new(expression)
    }
}

impl fmt::Display for TickerQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
