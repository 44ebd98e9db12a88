use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

use crate::frame::{Frame, ToFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

fn build_table(frame: &Frame) -> Table {
    let mut builder = Builder::default();
    builder.push_record(frame.header.clone());
    for row in &frame.rows {
        builder.push_record(row.clone());
    }
    builder.build()
}

// -- Table output --

pub fn render_table(frame: &Frame) -> String {
    build_table(frame).to_string()
}

// -- Markdown output --

pub fn render_markdown(frame: &Frame) -> String {
    let mut table = build_table(frame);
    table.with(Style::markdown());
    table.to_string()
}

// -- CSV output --

pub fn write_csv<W: Write>(frame: &Frame, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&frame.header)?;
    for row in &frame.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `frame` to a CSV file, replacing any existing file.
pub fn export_csv(frame: &Frame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(frame, file).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} rows to {}", frame.rows.len(), path.display());
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Prints a result in the requested format. JSON keeps the raw nested
/// shape; every other format goes through the tabular view.
pub fn print_result<T>(data: &T, format: OutputFormat) -> Result<()>
where
    T: Serialize + ToFrame,
{
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Table => println!("{}", render_table(&data.to_frame())),
        OutputFormat::Markdown => println!("{}", render_markdown(&data.to_frame())),
        OutputFormat::Csv => write_csv(&data.to_frame(), std::io::stdout())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exante_api::types::{Metadata, TimeSeries};

    fn sample_series() -> TimeSeries {
        serde_json::from_value(serde_json::json!({
            "RU.NSGAS.GER.FLOWS.H": {"2021-03-01 00:00": 150.5, "2021-03-01 01:00": 151.0},
            "RU.YAMALGAS.FLOWS.H": {"2021-03-01 00:00": 80.25}
        }))
        .unwrap()
    }

    fn csv_string(frame: &Frame) -> String {
        let mut buf = Vec::new();
        write_csv(frame, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_time_series() {
        let csv = csv_string(&sample_series().to_frame());
        insta::assert_snapshot!(csv, @r"
        Date,RU.NSGAS.GER.FLOWS.H,RU.YAMALGAS.FLOWS.H
        2021-03-01 00:00,150.5,80.25
        2021-03-01 01:00,151.0,
        ");
    }

    #[test]
    fn csv_metadata_quotes_commas() {
        let meta: Metadata = serde_json::from_value(serde_json::json!({
            "CN.CBINT.M": {"Description": "China: Interbank rate, monthly"}
        }))
        .unwrap();
        let csv = csv_string(&meta.to_frame());
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Field,CN.CBINT.M"));
        assert_eq!(
            lines.next(),
            Some("Description,\"China: Interbank rate, monthly\"")
        );
    }

    #[test]
    fn table_contains_headers_and_values() {
        let table = render_table(&sample_series().to_frame());
        assert!(table.contains("Date"));
        assert!(table.contains("RU.YAMALGAS.FLOWS.H"));
        assert!(table.contains("80.25"));
    }

    #[test]
    fn markdown_structure() {
        let md = render_markdown(&sample_series().to_frame());

        assert!(md.contains('|'));
        assert!(md.contains("---"));
        let header_line = md.lines().next().unwrap();
        assert!(header_line.contains("Date"));
        assert!(header_line.contains("RU.NSGAS.GER.FLOWS.H"));
    }

    #[test]
    fn markdown_empty_produces_headers_only() {
        let md = render_markdown(&TimeSeries::default().to_frame());
        let lines: Vec<&str> = md.lines().collect();
        assert!(lines.len() <= 2, "expected at most 2 lines for empty table, got {}", lines.len());
        if !lines.is_empty() {
            assert!(lines[0].contains("Date"));
        }
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data_from_api.csv");
        export_csv(&sample_series().to_frame(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Date,RU.NSGAS.GER.FLOWS.H,RU.YAMALGAS.FLOWS.H\n"));
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(export_csv(&sample_series().to_frame(), &path).is_err());
    }

    #[test]
    fn json_keeps_nested_shape() {
        let value = serde_json::to_value(sample_series()).unwrap();
        assert_eq!(value["RU.YAMALGAS.FLOWS.H"]["2021-03-01 00:00"], 80.25);
    }
}
