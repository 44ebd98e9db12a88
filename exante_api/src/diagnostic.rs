//! Diagnostics for failed API responses.

use std::fmt;

use serde_json::{Map, Value};

use crate::operation::Operation;

/// What the service told us about a failed call.
///
/// Both `ERROR` and `MESSAGE` are optional in the response body; a body
/// that is not JSON at all simply yields neither.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation: Option<Operation>,
    pub status: Option<u16>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl Diagnostic {
    /// Builds a diagnostic from a raw response body.
    pub fn from_body(operation: Operation, status: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => Self::from_object(operation, status, &object),
            _ => Self {
                operation: Some(operation),
                status: Some(status),
                ..Self::default()
            },
        }
    }

    /// Builds a diagnostic from an already parsed JSON object.
    pub fn from_object(operation: Operation, status: u16, object: &Map<String, Value>) -> Self {
        Self {
            operation: Some(operation),
            status: Some(status),
            code: object.get("ERROR").and_then(field_text),
            message: object.get("MESSAGE").and_then(field_text),
        }
    }

    /// Writes the diagnostic to the error log.
    pub fn report(&self) {
        match self.status {
            Some(status) => tracing::error!(status, "{}", self),
            None => tracing::error!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Some(operation) => write!(f, "Error retrieving data from API in {}", operation)?,
            None => f.write_str("Error retrieving data from API")?,
        }
        if let Some(code) = &self.code {
            write!(f, "\nAPI Error Code: \t{}", code)?;
        }
        if let Some(message) = &self.message {
            write!(f, "\nAPI Error Message: \t{}", message)?;
        }
        Ok(())
    }
}

// Codes come back as strings or numbers depending on the endpoint.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
