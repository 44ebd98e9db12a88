//! Error types for the API client.

use crate::operation::Operation;

/// Errors that can occur when talking to the data API.
///
/// Every operation on [`crate::Client`] returns one of these instead of a
/// partially populated result. Failures coming back from the service carry
/// the optional `ERROR` code and `MESSAGE` text it reported.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The configured base URL could not be parsed or joined.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The underlying HTTP client could not be built (bad proxy, TLS backend).
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("Request failed in {operation}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with something other than HTTP 200.
    #[error("{operation} failed with status {status}{}", api_detail(.code, .message))]
    HttpStatus {
        operation: Operation,
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
    /// HTTP 200, but the body was empty, `null`, or an empty object.
    #[error("{operation} returned an empty response")]
    EmptyResponse { operation: Operation },
    /// HTTP 200, but the expected top-level field was absent.
    #[error("{operation} response is missing {field}{}", api_detail(.code, .message))]
    MissingField {
        operation: Operation,
        field: &'static str,
        code: Option<String>,
        message: Option<String>,
    },
    /// The body was not JSON, or the field did not have the expected shape.
    #[error("Failed to parse {operation} response")]
    Parse {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// The operation that failed, when the failure came from a request.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::InvalidUrl(_) | Self::ClientBuild(_) => None,
            Self::Transport { operation, .. }
            | Self::HttpStatus { operation, .. }
            | Self::EmptyResponse { operation }
            | Self::MissingField { operation, .. }
            | Self::Parse { operation, .. } => Some(*operation),
        }
    }

    /// The `ERROR` code reported by the service, if any.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { code, .. } | Self::MissingField { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The `MESSAGE` text reported by the service, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { message, .. } | Self::MissingField { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

fn api_detail(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(" ({}: {})", code, message),
        (Some(code), None) => format!(" ({})", code),
        (None, Some(message)) => format!(" ({})", message),
        (None, None) => String::new(),
    }
}
