//! Client configuration: base URL, TLS verification, proxy, and wire format.

use std::fmt;

use crate::query::WireFormat;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://apidata.exantedata.com/";

/// Username and password issued by the data vendor.
///
/// Kept in memory only. `Debug` never prints the password.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Transport settings for [`crate::Client`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Verify the server's TLS certificate. Only turn off when told to.
    pub verify_tls: bool,
    /// Outbound proxy applied to every request, e.g. `https://10.0.0.1:3128`.
    pub proxy: Option<String>,
    pub wire_format: WireFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            verify_tls: true,
            proxy: None,
            wire_format: WireFormat::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn with_proxy(mut self, proxy: &str) -> Self {
        self.proxy = Some(proxy.to_string());
        self
    }

    pub fn with_wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = wire_format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production_with_tls() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://apidata.exantedata.com/");
        assert!(config.verify_tls);
        assert!(config.proxy.is_none());
        assert_eq!(config.wire_format, WireFormat::Form);
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080")
            .with_verify_tls(false)
            .with_proxy("http://proxy:3128")
            .with_wire_format(WireFormat::Json);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(!config.verify_tls);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:3128"));
        assert_eq!(config.wire_format, WireFormat::Json);
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("maria@example.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("maria@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
