/// Hype Holders - Core Library
///
/// Shared functionality for the holder dashboard and the account fetch tools:
/// - hype-dashboard: holder distribution dashboard
/// - hype-details: balances and transfer flows of one address
/// - hype-ingoing: inbound and genesis flows of one address
///
/// The library includes:
/// - Holder records and cluster classification
/// - Aggregate metrics for the dashboard
/// - Hyperliquid Info API client
/// - Ledger reduction and JSON report layouts
pub mod analysis;
pub mod cluster;
pub mod error;
pub mod info;
pub mod ledger;
pub mod record;
pub mod report;
pub mod seed;
pub mod threshold;

// Re-export commonly used types for convenience
pub use cluster::{ClusterTag, Market, Partition, Tier, classify};
pub use record::{HolderRecord, HolderRecordBuilder};
pub use threshold::ThresholdConfig;

pub use analysis::{DashboardSummary, SpotDistribution, format_magnitude, truncate_address};

pub use info::{InfoClient, InfoClientConfig, InfoRequest};
pub use ledger::{LedgerReducer, LedgerSummary, LedgerUpdate, ReduceMode};
pub use report::{DetailsReport, IngoingReport, write_report};
