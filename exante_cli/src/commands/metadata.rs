use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use exante_api::{Client, TickerQuery};

use crate::frame::ToFrame;
use crate::output::{export_csv, print_result, OutputFormat};

use super::{report_empty, report_failure};

#[derive(Args)]
pub struct MetadataArgs {
    /// Ticker expression: comma-separated tickers, % as wildcard
    pub ticker: String,

    /// Also write the metadata to a CSV file
    #[arg(long, num_args = 0..=1, default_missing_value = "metadata_from_api.csv")]
    pub export: Option<PathBuf>,
}

pub async fn run(args: &MetadataArgs, client: &Client, format: OutputFormat) -> Result<()> {
    let meta = match client.get_metadata(&TickerQuery::new(args.ticker.as_str())).await {
        Ok(meta) => meta,
        Err(e) => {
            report_failure(&e);
            return Ok(());
        }
    };

    if meta.is_empty() {
        report_empty("metadata");
        return Ok(());
    }

    print_result(&meta, format)?;

    if let Some(path) = &args.export {
        export_csv(&meta.to_frame(), path)?;
    }

    Ok(())
}
