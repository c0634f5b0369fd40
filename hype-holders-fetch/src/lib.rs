/// Hype Holders Fetch - Shared Library
///
/// Common plumbing for the two account fetch binaries:
/// - hype-details: balances plus inbound, outbound and genesis flows
/// - hype-ingoing: inbound and genesis flows only
///
/// Network failures never abort a run. Each request result is logged and
/// collapsed into an absent value, and absent inputs reduce to zero or empty.
pub mod config;

pub use config::FetchConfig;

use chrono::{DateTime, Utc};
use hype_holders::{
    error::InfoError,
    info::{DelegatorSummary, SpotClearinghouseState},
    ledger::{LedgerReducer, LedgerUpdate, ReduceMode},
    report::{DetailsReport, IngoingReport},
};
use tracing::{error, info};

/// Initialise `tracing` with an `EnvFilter` from `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Log a failed request and collapse it into an absent result.
pub fn absent_on_error<T>(what: &'static str, result: Result<T, InfoError>) -> Option<T> {
    match result {
        Ok(value) => {
            info!(request = what, "request succeeded");
            Some(value)
        }
        Err(error) => {
            error!(request = what, %error, "request failed, treating result as absent");
            None
        }
    }
}

/// Responses gathered for a details run, each absent if its request failed.
#[derive(Debug, Clone, Default)]
pub struct DetailsInputs {
    pub spot_state: Option<SpotClearinghouseState>,
    pub staking: Option<DelegatorSummary>,
    pub fills: Option<Vec<serde_json::Value>>,
    pub ledger: Option<Vec<LedgerUpdate>>,
}

pub fn build_details_report(
    config: &FetchConfig,
    timestamp: DateTime<Utc>,
    inputs: &DetailsInputs,
) -> DetailsReport {
    let spot_balance = inputs
        .spot_state
        .as_ref()
        .map(|state| state.balance_of(&config.token))
        .unwrap_or(0.0);

    let staked_balance = inputs
        .staking
        .as_ref()
        .map(DelegatorSummary::delegated_amount)
        .unwrap_or(0.0);

    let summary = LedgerReducer::new(&config.address, &config.token, ReduceMode::Details)
        .reduce(inputs.ledger.iter().flatten());

    let fill_count = inputs.fills.as_ref().map_or(0, Vec::len);

    DetailsReport::new(
        timestamp,
        &config.address,
        spot_balance,
        staked_balance,
        &summary,
        fill_count,
    )
}

pub fn build_ingoing_report(
    config: &FetchConfig,
    timestamp: DateTime<Utc>,
    ledger: Option<&[LedgerUpdate]>,
) -> IngoingReport {
    let summary = LedgerReducer::new(&config.address, &config.token, ReduceMode::IngoingOnly)
        .reduce(ledger.into_iter().flatten());

    IngoingReport::new(timestamp, &config.address, &summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TRACKED: &str = "0x9b83f16d0a6456f90a8a330f04c0ca1b2f0425b0";

    fn timestamp() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_735_689_600_000).unwrap()
    }

    fn ledger() -> Vec<LedgerUpdate> {
        LedgerUpdate::parse_all(json!([
            {"time": 1, "hash": "0x01", "delta": {"type": "spotGenesis", "token": "HYPE", "amount": "1000"}},
            {"time": 2, "hash": "0x02", "delta": {"type": "spotTransfer", "token": "HYPE", "amount": "25.5",
                "user": "0xAAA", "destination": TRACKED}},
            {"time": 3, "hash": "0x02", "delta": {"type": "spotTransfer", "token": "HYPE", "amount": "25.5",
                "user": "0xAAA", "destination": TRACKED}},
            {"time": 4, "hash": "0x03", "delta": {"type": "spotTransfer", "token": "HYPE", "amount": "4",
                "user": TRACKED, "destination": "0xBBB"}},
            {"time": 5, "hash": "0x04", "delta": {"type": "spotTransfer", "token": "PURR", "amount": "99",
                "user": "0xCCC", "destination": TRACKED}}
        ]))
    }

    #[test]
    fn test_details_report_with_all_inputs() {
        let config = FetchConfig::new(TRACKED);
        let inputs = DetailsInputs {
            spot_state: Some(
                serde_json::from_value(json!({"balances": [{"coin": "HYPE", "total": "10.5"}]})).unwrap(),
            ),
            staking: Some(serde_json::from_value(json!({"delegated": "20"})).unwrap()),
            fills: Some(vec![json!({}), json!({})]),
            ledger: Some(ledger()),
        };

        let report = build_details_report(&config, timestamp(), &inputs);

        assert_eq!(report.address, TRACKED);
        assert_eq!(report.total_hype_balance, 30.5);
        assert_eq!(report.hype_balances.unstaked_l1_spot, 10.5);
        assert_eq!(report.hype_balances.staked, 20.0);
        assert_eq!(report.summary.total_genesis_received, 1000.0);
        assert_eq!(report.summary.total_ingoing_transfers, 25.5);
        assert_eq!(report.hype_ingoing_transfers.count, 1);
        assert_eq!(report.hype_ingoing_transfers.details[0].sender, "0xaaa");
        assert_eq!(report.hype_outgoing_transfers.count, 1);
        assert_eq!(report.hype_outgoing_transfers.details[0].destination, "0xbbb");
        assert_eq!(report.hype_outgoing_transfers.details[0].amount, 4.0);
        assert_eq!(report.genesis.count, 1);
        assert_eq!(report.spot_fill_count, 2);
    }

    #[test]
    fn test_details_report_with_absent_inputs() {
        let config = FetchConfig::new(TRACKED);

        let report = build_details_report(&config, timestamp(), &DetailsInputs::default());

        assert_eq!(report.total_hype_balance, 0.0);
        assert_eq!(report.summary.total_genesis_received, 0.0);
        assert_eq!(report.summary.total_ingoing_transfers, 0.0);
        assert_eq!(report.hype_ingoing_transfers.count, 0);
        assert_eq!(report.hype_outgoing_transfers.count, 0);
        assert_eq!(report.genesis.count, 0);
        assert_eq!(report.spot_fill_count, 0);
    }

    #[test]
    fn test_ingoing_report() {
        let config = FetchConfig::new(TRACKED);
        let updates = ledger();

        let report = build_ingoing_report(&config, timestamp(), Some(updates.as_slice()));
        assert_eq!(report.summary.total_genesis_received, 1000.0);
        assert_eq!(report.summary.total_ingoing_transfers, 25.5);
        assert_eq!(report.ingoing_transfers.count, 1);
        assert_eq!(report.genesis.count, 1);

        let empty = build_ingoing_report(&config, timestamp(), None);
        assert_eq!(empty.ingoing_transfers.count, 0);
        assert_eq!(empty.genesis.count, 0);
    }

    #[test]
    fn test_absent_on_error() {
        assert_eq!(absent_on_error("spotClearinghouseState", Ok(3)), Some(3));

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(absent_on_error::<u8>("userFills", Err(InfoError::from(decode))), None);
    }
}
