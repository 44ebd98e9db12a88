//! The `all` subcommand: authenticate, then fetch update times, metadata,
//! the time series, and last values for one ticker expression.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use exante_api::types::{LastUpdated, Metadata, TimeSeries};
use exante_api::{Client, Error, TickerQuery};
use serde::Serialize;

use crate::frame::ToFrame;
use crate::output::{export_csv, print_json, print_result, OutputFormat};

use super::data::build_query;
use super::{note, report_failure};

const DATA_CSV: &str = "data_from_api.csv";
const METADATA_CSV: &str = "metadata_from_api.csv";

#[derive(Args)]
pub struct AllArgs {
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

    /// Write the series to data_from_api.csv and the metadata to metadata_from_api.csv
    #[arg(long)]
    pub export: bool,
}

/// Whatever succeeded. Failed or empty sections are `None`.
#[derive(Serialize, Default)]
pub(crate) struct Report {
    updated: Option<LastUpdated>,
    metadata: Option<Metadata>,
    data: Option<TimeSeries>,
    last: Option<TimeSeries>,
}

pub async fn run(args: &AllArgs, client: &Client, format: OutputFormat) -> Result<()> {
    let token = match client.get_token().await {
        Ok(token) => token,
        Err(e) => {
            report_failure(&e);
            return Ok(());
        }
    };
    note(format, &format!("Access Token: {}\n", token));

    let report = fetch_report(args, client).await;

    if format == OutputFormat::Json {
        print_json(&report);
    } else {
        print_sections(&report, format)?;
    }

    if args.export {
        export_report(&report, Path::new("."))?;
    }

    Ok(())
}

/// Runs the four queries in order. A failed query leaves its section empty
/// and does not stop the rest.
async fn fetch_report(args: &AllArgs, client: &Client) -> Report {
    let ticker = TickerQuery::new(args.ticker.as_str());
    let query = build_query(&args.ticker, args.start, args.end, args.begin_of_period);

    Report {
        updated: keep(client.check_last_updated(&ticker).await, LastUpdated::is_empty),
        metadata: keep(client.get_metadata(&ticker).await, Metadata::is_empty),
        data: keep(client.get_data(&query).await, TimeSeries::is_empty),
        last: keep(client.get_last_value(&ticker).await, TimeSeries::is_empty),
    }
}

fn keep<T>(result: Result<T, Error>, is_empty: fn(&T) -> bool) -> Option<T> {
    match result {
        Ok(value) if is_empty(&value) => None,
        Ok(value) => Some(value),
        Err(e) => {
            report_failure(&e);
            None
        }
    }
}

fn print_sections(report: &Report, format: OutputFormat) -> Result<()> {
    if let Some(updated) = &report.updated {
        note(format, "\nData last updated:\n");
        print_result(updated, format)?;
    }
    if let Some(metadata) = &report.metadata {
        note(format, "\nTicker Meta Data:\n");
        print_result(metadata, format)?;
    }
    if let Some(data) = &report.data {
        note(format, "\nTicker Data:\n");
        print_result(data, format)?;
    }
    if let Some(last) = &report.last {
        note(format, "\nLast Value:\n");
        print_result(last, format)?;
    }
    Ok(())
}

fn export_report(report: &Report, dir: &Path) -> Result<()> {
    if let Some(metadata) = &report.metadata {
        export_csv(&metadata.to_frame(), &dir.join(METADATA_CSV))?;
    }
    if let Some(data) = &report.data {
        export_csv(&data.to_frame(), &dir.join(DATA_CSV))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{authenticated_server, respond};
    use serde_json::json;
    use wiremock::MockServer;

    fn args(ticker: &str) -> AllArgs {
        AllArgs {
            ticker: ticker.to_string(),
            start: None,
            end: None,
            begin_of_period: false,
            export: false,
        }
    }

    async fn server_with_failing_metadata() -> (MockServer, Client) {
        let (server, client) = authenticated_server().await;
        respond(
            &server,
            "/Data/Updated",
            200,
            json!({"UPDATED": {"T1": "2021-06-01 09:00:00"}}),
        )
        .await;
        respond(
            &server,
            "/Data/Metadata",
            400,
            json!({"ERROR": "E1", "MESSAGE": "bad ticker"}),
        )
        .await;
        respond(&server, "/Data/Data", 200, json!({"DATA": {"T1": {"2021-01-01": 1.0}}})).await;
        respond(&server, "/Data/Last", 200, json!({"DATA": {"T1": {"2021-01-01": 1.0}}})).await;
        (server, client)
    }

    fn report() -> Report {
        Report {
            updated: None,
            metadata: Some(
                serde_json::from_value(json!({"T1": {"Frequency": "M"}})).unwrap(),
            ),
            data: Some(serde_json::from_value(json!({"T1": {"2021-01-01": 10.0}})).unwrap()),
            last: None,
        }
    }

    #[test]
    fn keep_drops_failures_and_empties() {
        let failed: Result<LastUpdated, _> = Err(Error::EmptyResponse {
            operation: exante_api::Operation::CheckLastUpdated,
        });
        assert!(keep(failed, LastUpdated::is_empty).is_none());
        assert!(keep(Ok(LastUpdated::default()), LastUpdated::is_empty).is_none());

        let data: TimeSeries = serde_json::from_value(json!({"T1": {"2021-01-01": 1.0}})).unwrap();
        assert!(keep(Ok(data), TimeSeries::is_empty).is_some());
    }

    #[test]
    fn report_serializes_missing_sections_as_null() {
        let value = serde_json::to_value(report()).unwrap();
        assert!(value["updated"].is_null());
        assert!(value["last"].is_null());
        assert_eq!(value["data"]["T1"]["2021-01-01"], 10.0);
        assert_eq!(value["metadata"]["T1"]["Frequency"], "M");
    }

    #[test]
    fn export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        export_report(&report(), dir.path()).unwrap();

        let data = std::fs::read_to_string(dir.path().join(DATA_CSV)).unwrap();
        assert_eq!(data, "Date,T1\n2021-01-01,10.0\n");
        let meta = std::fs::read_to_string(dir.path().join(METADATA_CSV)).unwrap();
        assert_eq!(meta, "Field,T1\nFrequency,M\n");
    }

    #[tokio::test]
    async fn failed_section_does_not_stop_the_rest() {
        let (_server, client) = server_with_failing_metadata().await;
        let report = fetch_report(&args("T1"), &client).await;

        assert!(report.metadata.is_none());
        assert_eq!(report.updated.unwrap().get("T1"), Some("2021-06-01 09:00:00"));
        assert_eq!(report.data.unwrap().len(), 1);
        assert!(report.last.is_some());
    }

    #[tokio::test]
    async fn run_returns_ok_when_a_section_fails() {
        let (_server, client) = server_with_failing_metadata().await;
        for format in [OutputFormat::Table, OutputFormat::Csv, OutputFormat::Json] {
            assert!(run(&args("T1"), &client, format).await.is_ok());
        }
    }

    #[tokio::test]
    async fn run_returns_ok_when_authentication_fails() {
        let server = MockServer::start().await;
        respond(&server, "/getToken", 401, json!({"MESSAGE": "Invalid credentials"})).await;
        let client = Client::with_base_url(
            &server.uri(),
            exante_api::Credentials::new("analyst", "wrong"),
        )
        .unwrap();

        assert!(run(&args("T1"), &client, OutputFormat::Table).await.is_ok());
        assert!(client.cached_token().is_none());
    }

    #[test]
    fn export_skips_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        export_report(&Report::default(), dir.path()).unwrap();
        assert!(!dir.path().join(DATA_CSV).exists());
        assert!(!dir.path().join(METADATA_CSV).exists());
    }
}
