use thiserror::Error;

/// Errors generated while constructing a [`HolderRecord`](crate::record::HolderRecord).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("holder record rank must be 1-based, got: {0}")]
    InvalidRank(u32),

    #[error("holder record address is empty")]
    EmptyAddress,

    #[error("{address}: {field} must be a non-negative finite number, got: {value}")]
    InvalidAmount {
        address: String,
        field: &'static str,
        value: f64,
    },

    #[error(
        "\
        {address}: total balance {total} does not equal liquid {liquid} + staked {staked} \
    "
    )]
    InconsistentTotal {
        address: String,
        liquid: f64,
        staked: f64,
        total: f64,
    },
}

/// Errors generated while validating a [`ThresholdConfig`](crate::threshold::ThresholdConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{name} must be a non-negative finite number, got: {value}")]
    InvalidFloor { name: &'static str, value: f64 },

    #[error("{market} tiers overlap: mid floor {mid} must be below whale floor {whale}")]
    Inverted {
        market: &'static str,
        mid: f64,
        whale: f64,
    },

    #[error("failed to parse {var}={value} as a number")]
    Parse { var: &'static str, value: String },
}

/// Errors generated by the [`InfoClient`](crate::info::InfoClient).
#[derive(Debug, Error)]
pub enum InfoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("JSON parse failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid Info endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

/// Errors generated while writing a report to disk.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialise report: {0}")]
    Serialise(#[from] serde_json::Error),
}
