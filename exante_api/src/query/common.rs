//! Shared query infrastructure: the [`Query`] trait, [`WireFormat`], and [`PeriodAlignment`].

use std::fmt;
use std::str::FromStr;

use reqwest::RequestBuilder;
use serde_json::{Map, Value};

/// A named request body field. `None` marks an optional field left unset.
pub type Field = (&'static str, Option<String>);

/// Trait implemented by every request payload. Produces the body fields in
/// the order the service documents them.
pub trait Query {
    /// Returns the body fields for the given wire format.
    fn fields(&self, format: WireFormat) -> Vec<Field>;
}

/// How request bodies are encoded.
///
/// The service has been seen accepting two conventions. They differ in body
/// encoding, content type, and the strings used for [`PeriodAlignment`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WireFormat {
    /// `application/x-www-form-urlencoded` bodies, period sent as
    /// `begin`/`end`. Unset optional fields are omitted. This is the default.
    #[default]
    Form,
    /// `application/json` bodies, period sent as `bop`/`eop`. Unset optional
    /// fields are sent as `null`.
    Json,
}

impl WireFormat {
    /// Attaches `fields` to `request` as its body.
    pub(crate) fn attach(self, request: RequestBuilder, fields: Vec<Field>) -> RequestBuilder {
        match self {
            WireFormat::Form => request.form(&form_pairs(fields)),
            WireFormat::Json => request.json(&json_object(fields)),
        }
    }
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "form" => Ok(WireFormat::Form),
            "json" => Ok(WireFormat::Json),
            other => Err(format!("unknown wire format '{}' (expected form or json)", other)),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WireFormat::Form => "form",
            WireFormat::Json => "json",
        })
    }
}

/// Whether an observation is stamped at the beginning or end of its period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PeriodAlignment {
    /// Beginning of period.
    Begin,
    /// End of period. This is the default.
    #[default]
    End,
}

impl PeriodAlignment {
    pub fn from_end_of_period(end_of_period: bool) -> Self {
        if end_of_period {
            PeriodAlignment::End
        } else {
            PeriodAlignment::Begin
        }
    }

    /// The string the service expects for this alignment.
    pub fn as_wire(self, format: WireFormat) -> &'static str {
        match (self, format) {
            (PeriodAlignment::Begin, WireFormat::Form) => "begin",
            (PeriodAlignment::End, WireFormat::Form) => "end",
            (PeriodAlignment::Begin, WireFormat::Json) => "bop",
            (PeriodAlignment::End, WireFormat::Json) => "eop",
        }
    }
}

pub(crate) fn form_pairs(fields: Vec<Field>) -> Vec<(&'static str, String)> {
    fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
}

pub(crate) fn json_object(fields: Vec<Field>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.map_or(Value::Null, Value::String)))
        .collect()
}
