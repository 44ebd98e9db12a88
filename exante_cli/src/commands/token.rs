use anyhow::Result;
use exante_api::Client;

use super::report_failure;

pub async fn run(client: &Client) -> Result<()> {
    match client.get_token().await {
        Ok(token) => println!("Access Token: {}", token),
        Err(e) => report_failure(&e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{authenticated_server, respond};
    use exante_api::Credentials;
    use serde_json::json;
    use wiremock::MockServer;

    #[tokio::test]
    async fn run_caches_token() {
        let (_server, client) = authenticated_server().await;
        run(&client).await.unwrap();
        assert_eq!(client.cached_token().as_deref(), Some("test-token"));
    }

    #[tokio::test]
    async fn run_returns_ok_when_rejected() {
        let server = MockServer::start().await;
        respond(&server, "/getToken", 401, json!({"MESSAGE": "Invalid credentials"})).await;
        let client = Client::with_base_url(&server.uri(), Credentials::new("analyst", "wrong"))
            .unwrap();

        assert!(run(&client).await.is_ok());
        assert!(client.cached_token().is_none());
    }
}
