use chrono::NaiveDate;

use super::common::{Field, PeriodAlignment, Query, WireFormat};
use super::ticker::TickerQuery;

/// A time-series request: tickers, an optional date window, and period alignment.
///
/// Without a start date the service falls back to its default lookback;
/// without an end date it returns data up to the most recent observation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataQuery {
    pub ticker: TickerQuery,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub period: PeriodAlignment,
}

impl DataQuery {
    pub fn new(ticker: impl Into<TickerQuery>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_period(mut self, period: PeriodAlignment) -> Self {
        self.period = period;
        self
    }

    /// Shorthand for [`with_period`](Self::with_period) from a boolean flag.
    pub fn with_end_of_period(self, end_of_period: bool) -> Self {
        self.with_period(PeriodAlignment::from_end_of_period(end_of_period))
    }
}

impl Query for DataQuery {
    fn fields(&self, format: WireFormat) -> Vec<Field> {
        vec![
            ("ticker", Some(self.ticker.as_str().to_string())),
            ("startDate", self.start_date.map(format_date)),
            ("endDate", self.end_date.map(format_date)),
            ("period", Some(self.period.as_wire(format).to_string())),
        ]
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
