use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use exante_api::{Client, DataQuery};

use crate::frame::ToFrame;
use crate::output::{export_csv, print_result, OutputFormat};

use super::{report_empty, report_failure};

#[derive(Args)]
pub struct DataArgs {
    /// Ticker expression: comma-separated tickers, % as wildcard
    pub ticker: String,

    /// First date to return (YYYY-MM-DD). Omit for the service's default lookback
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date to return (YYYY-MM-DD). Omit for the most recent data
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Stamp observations at the beginning of each period instead of the end
    #[arg(long)]
    pub begin_of_period: bool,

    /// Also write the series to a CSV file
    #[arg(long, num_args = 0..=1, default_missing_value = "data_from_api.csv")]
    pub export: Option<PathBuf>,
}

impl DataArgs {
    pub fn to_query(&self) -> DataQuery {
        build_query(&self.ticker, self.start, self.end, self.begin_of_period)
    }
}

pub(crate) fn build_query(
    ticker: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    begin_of_period: bool,
) -> DataQuery {
    let mut query = DataQuery::new(ticker).with_end_of_period(!begin_of_period);
    if let Some(start) = start {
        query = query.with_start_date(start);
    }
    if let Some(end) = end {
        query = query.with_end_date(end);
    }
    query
}

pub async fn run(args: &DataArgs, client: &Client, format: OutputFormat) -> Result<()> {
    let data = match client.get_data(&args.to_query()).await {
        Ok(data) => data,
        Err(e) => {
            report_failure(&e);
            return Ok(());
        }
    };

    if data.is_empty() {
        report_empty("time series");
        return Ok(());
    }

    print_result(&data, format)?;

    if let Some(path) = &args.export {
        export_csv(&data.to_frame(), path)?;
    }

    Ok(())
}
