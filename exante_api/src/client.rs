//! HTTP client for the Exante Data API.

use std::sync::Mutex;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    config::{ClientConfig, Credentials},
    diagnostic::Diagnostic,
    operation::Operation,
    query::{DataQuery, Field, Query, TickerQuery, WireFormat},
    types::{LastUpdated, Metadata, TimeSeries},
    Error,
};

/// HTTP client for the Exante Data API.
///
/// Owns the session: the first call that needs a token authenticates with
/// the stored credentials and the token is reused for every later call on
/// this client. There is no expiry handling; a rejected token surfaces as an
/// [`Error::HttpStatus`] and is not refreshed automatically.
///
/// Every operation is a single POST. Nothing is retried.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    wire_format: WireFormat,
    token: Mutex<Option<String>>,
}

impl Client {
    /// Creates a client for the production API with default settings.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self, Error> {
        Self::with_config(credentials, ClientConfig::default().with_base_url(base_url))
    }

    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if !config.verify_tls {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(Error::ClientBuild)?);
        }
        let http = builder.build().map_err(Error::ClientBuild)?;

        Ok(Self {
            http,
            base_url: parse_base_url(&config.base_url)?,
            credentials,
            wire_format: config.wire_format,
            token: Mutex::new(None),
        })
    }

    pub fn wire_format(&self) -> WireFormat {
        self.wire_format
    }

    /// The cached session token, if this client has authenticated.
    pub fn cached_token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Forgets the cached token so the next call authenticates again.
    pub fn clear_token(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Returns the session token, authenticating only if none is cached.
    pub async fn get_token(&self) -> Result<String, Error> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let fields: Vec<Field> = vec![
            ("username", Some(self.credentials.username.clone())),
            ("password", Some(self.credentials.password.clone())),
        ];
        let token: String = self.post(Operation::GetToken, fields, None).await?;
        if token.is_empty() {
            Diagnostic {
                operation: Some(Operation::GetToken),
                status: Some(StatusCode::OK.as_u16()),
                ..Diagnostic::default()
            }
            .report();
            return Err(Error::MissingField {
                operation: Operation::GetToken,
                field: Operation::GetToken.response_field(),
                code: None,
                message: None,
            });
        }

        tracing::debug!(user = %self.credentials.username, "Authenticated");
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.clone());
        Ok(token)
    }

    /// Makes sure a session token is cached.
    pub async fn ensure_authenticated(&self) -> Result<(), Error> {
        self.get_token().await.map(|_| ())
    }

    /// Fetches time series for the query's tickers and date window.
    pub async fn get_data(&self, query: &DataQuery) -> Result<TimeSeries, Error> {
        self.query(Operation::GetData, query).await
    }

    /// Fetches the timestamp each ticker was last updated.
    pub async fn check_last_updated(&self, query: &TickerQuery) -> Result<LastUpdated, Error> {
        self.query(Operation::CheckLastUpdated, query).await
    }

    /// Fetches descriptive metadata, including last-updated time and last value.
    pub async fn get_metadata(&self, query: &TickerQuery) -> Result<Metadata, Error> {
        self.query(Operation::GetMetadata, query).await
    }

    /// Fetches the most recent observation of each ticker.
    ///
    /// Each ticker maps to a single-entry series; use
    /// [`TimeSeries::last_observation`] to read it.
    pub async fn get_last_value(&self, query: &TickerQuery) -> Result<TimeSeries, Error> {
        self.query(Operation::GetLastValue, query).await
    }

    async fn query<T, Q>(&self, operation: Operation, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let token = self.get_token().await?;
        self.post(operation, query.fields(self.wire_format), Some(&token))
            .await
    }

    async fn post<T>(
        &self,
        operation: Operation,
        fields: Vec<Field>,
        bearer: Option<&str>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.base_url.join(operation.path())?;
        tracing::debug!("POST {} ({})", url, operation);

        let mut request = self.http.post(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let resp = self
            .wire_format
            .attach(request, fields)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send {} request: {}", operation, e);
                Error::Transport {
                    operation,
                    source: e,
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read {} response body: {}", operation, e);
            Error::Transport {
                operation,
                source: e,
            }
        })?;

        if status != StatusCode::OK {
            let diag = Diagnostic::from_body(operation, status.as_u16(), &body);
            diag.report();
            return Err(Error::HttpStatus {
                operation,
                status: status.as_u16(),
                code: diag.code,
                message: diag.message,
            });
        }

        extract(operation, &body)
    }
}

/// Pulls the operation's designated field out of a 200 response body.
fn extract<T: DeserializeOwned>(operation: Operation, body: &str) -> Result<T, Error> {
    let status = StatusCode::OK.as_u16();
    let value = serde_json::from_str::<Value>(body).map_err(|e| {
        tracing::error!(
            "Failed to parse {} response: {} | body: {}",
            operation,
            e,
            truncate_body(body)
        );
        Error::Parse {
            operation,
            source: e,
        }
    })?;

    let mut object = match value {
        Value::Object(object) if !object.is_empty() => object,
        _ => {
            Diagnostic::from_body(operation, status, body).report();
            return Err(Error::EmptyResponse { operation });
        }
    };

    let field = operation.response_field();
    let Some(payload) = object.remove(field) else {
        let diag = Diagnostic::from_object(operation, status, &object);
        diag.report();
        return Err(Error::MissingField {
            operation,
            field,
            code: diag.code,
            message: diag.message,
        });
    };

    serde_json::from_value(payload).map_err(|e| {
        tracing::error!("Unexpected shape for {} in {} response: {}", field, operation, e);
        Error::Parse {
            operation,
            source: e,
        }
    })
}

// `Url::join` drops the last path segment unless the base ends with a slash.
fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
