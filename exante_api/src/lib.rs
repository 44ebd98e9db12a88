//! Client for the Exante Data HTTP API.
//!
//! Authenticates with a username and password, caches the bearer token on
//! the [`Client`], and exposes the service's four data queries. Results come
//! back as typed values; every failure is an [`Error`].

mod client;
pub mod config;
mod diagnostic;
mod errors;
mod operation;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::config::{ClientConfig, Credentials, DEFAULT_BASE_URL};
pub use self::diagnostic::Diagnostic;
pub use self::errors::Error;
pub use self::operation::Operation;
pub use self::query::{DataQuery, Field, PeriodAlignment, Query, TickerQuery, WireFormat};
