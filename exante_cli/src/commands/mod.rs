//! CLI subcommand implementations.
//!
//! A failed API call has already been logged by the client. Commands print a
//! short note and return `Ok`, so the process still exits normally; only
//! local problems such as an unwritable export path are returned as errors.

pub mod all;
pub mod data;
pub mod last;
pub mod metadata;
pub mod token;
pub mod updated;

use std::io::Write;

use clap::Args;
use exante_api::{Error, TickerQuery};

use crate::output::OutputFormat;

#[derive(Args)]
pub struct TickerArgs {
    /// Ticker expression: comma-separated tickers, % as wildcard (e.g. CN.CBINT.M or CN.%)
    pub ticker: String,
}

impl TickerArgs {
    pub fn to_query(&self) -> TickerQuery {
        TickerQuery::new(self.ticker.as_str())
    }
}

pub(crate) fn report_failure(err: &Error) {
    eprintln!("No result: {}", err);
}

pub(crate) fn report_empty(what: &str) {
    eprintln!("No {} returned", what);
}

/// Where headings and other decoration around a result go. Stdout carries
/// nothing but the CSV document in CSV mode, and JSON mode prints none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NoteTarget {
    Stdout,
    Stderr,
}

impl NoteTarget {
    pub(crate) fn for_format(format: OutputFormat) -> Option<Self> {
        match format {
            OutputFormat::Table | OutputFormat::Markdown => Some(Self::Stdout),
            OutputFormat::Csv => Some(Self::Stderr),
            OutputFormat::Json => None,
        }
    }
}

pub(crate) fn note(format: OutputFormat, text: &str) {
    let result = match NoteTarget::for_format(format) {
        Some(NoteTarget::Stdout) => writeln!(std::io::stdout(), "{}", text),
        Some(NoteTarget::Stderr) => writeln!(std::io::stderr(), "{}", text),
        None => Ok(()),
    };
    if let Err(e) = result {
        tracing::warn!("Failed to write note: {}", e);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use exante_api::{Client, Credentials};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Starts a mock service that issues a token and returns a client for it.
    pub(crate) async fn authenticated_server() -> (MockServer, Client) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/getToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"TOKEN": "test-token"})))
            .mount(&server)
            .await;
        let client = Client::with_base_url(&server.uri(), Credentials::new("analyst", "secret"))
            .unwrap();
        (server, client)
    }

    pub(crate) async fn respond(
        server: &MockServer,
        route: &str,
        status: u16,
        body: serde_json::Value,
    ) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }
}
