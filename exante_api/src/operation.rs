use std::fmt;

/// The five calls the data API exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Exchange username/password for a bearer token.
    GetToken,
    /// Time series for one or more tickers.
    GetData,
    /// Last-updated timestamp per ticker.
    CheckLastUpdated,
    /// Descriptive metadata per ticker.
    GetMetadata,
    /// Most recent observation per ticker.
    GetLastValue,
}

impl Operation {
    /// Endpoint path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::GetToken => "getToken",
            Self::GetData => "Data/Data",
            Self::CheckLastUpdated => "Data/Updated",
            Self::GetMetadata => "Data/Metadata",
            Self::GetLastValue => "Data/Last",
        }
    }

    /// Top-level JSON field holding the payload of a successful response.
    pub fn response_field(self) -> &'static str {
        match self {
            Self::GetToken => "TOKEN",
            Self::GetData | Self::GetLastValue => "DATA",
            Self::CheckLastUpdated => "UPDATED",
            Self::GetMetadata => "METADATA",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GetToken => "get_token",
            Self::GetData => "get_data",
            Self::CheckLastUpdated => "check_last_updated",
            Self::GetMetadata => "get_metadata",
            Self::GetLastValue => "get_last_value",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
