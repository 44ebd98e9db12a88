use anyhow::Result;
use exante_api::Client;

use crate::output::{print_result, OutputFormat};

use super::{report_empty, report_failure, TickerArgs};

pub async fn run(args: &TickerArgs, client: &Client, format: OutputFormat) -> Result<()> {
    match client.get_last_value(&args.to_query()).await {
        Ok(last) if last.is_empty() => report_empty("last values"),
        Ok(last) => print_result(&last, format)?,
        Err(e) => report_failure(&e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{authenticated_server, respond};
    use serde_json::json;

    fn args() -> TickerArgs {
        TickerArgs {
            ticker: "T1".to_string(),
        }
    }

    #[tokio::test]
    async fn run_prints_result() {
        let (server, client) = authenticated_server().await;
        respond(&server, "/Data/Last", 200, json!({"DATA": {"T1": {"2021-05-31": 2.1}}})).await;
        assert!(run(&args(), &client, OutputFormat::Csv).await.is_ok());
    }

    #[tokio::test]
    async fn run_returns_ok_on_api_failure() {
        let (server, client) = authenticated_server().await;
        respond(&server, "/Data/Last", 500, json!({"ERROR": "E500"})).await;
        assert!(run(&args(), &client, OutputFormat::Table).await.is_ok());
    }
}
