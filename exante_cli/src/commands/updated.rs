use anyhow::Result;
use exante_api::Client;

use crate::output::{print_result, OutputFormat};

use super::{report_empty, report_failure, TickerArgs};

pub async fn run(args: &TickerArgs, client: &Client, format: OutputFormat) -> Result<()> {
    match client.check_last_updated(&args.to_query()).await {
        Ok(updated) if updated.is_empty() => report_empty("update timestamps"),
        Ok(updated) => print_result(&updated, format)?,
        Err(e) => report_failure(&e),
    }
    Ok(())
}
