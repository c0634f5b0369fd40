//! JSON report layouts written by the fetch binaries.

use crate::{
    error::ReportError,
    ledger::{CounterpartyTotal, GENESIS_LABEL, LedgerSummary},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name prefix of [`DetailsReport`] files.
pub const DETAILS_PREFIX: &str = "hype_details_filtered";
/// File name prefix of [`IngoingReport`] files.
pub const INGOING_PREFIX: &str = "hype_ingoing";
/// `analysisType` tag of [`IngoingReport`].
pub const INGOING_ANALYSIS_TYPE: &str = "HYPE Ingoing & Genesis Only";

/// A counted list of report rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub count: usize,
    pub details: Vec<T>,
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(details: Vec<T>) -> Self {
        Self {
            count: details.len(),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingTransfer {
    pub destination: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngoingTransfer {
    pub sender: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenesisEntry {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSummary {
    pub total_genesis_received: f64,
    pub total_ingoing_transfers: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypeBalances {
    pub staked: f64,
    #[serde(rename = "unstakedL1Spot")]
    pub unstaked_l1_spot: f64,
}

/// Balances plus inbound, outbound and genesis flows for one address.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsReport {
    pub timestamp: String,
    pub address: String,
    pub total_hype_balance: f64,
    pub hype_balances: HypeBalances,
    pub summary: TransferSummary,
    pub hype_outgoing_transfers: Listing<OutgoingTransfer>,
    pub hype_ingoing_transfers: Listing<IngoingTransfer>,
    pub genesis: Listing<GenesisEntry>,
    pub spot_fill_count: usize,
}

impl DetailsReport {
    pub fn new(
        timestamp: DateTime<Utc>,
        address: impl Into<String>,
        spot_balance: f64,
        staked_balance: f64,
        ledger: &LedgerSummary,
        spot_fill_count: usize,
    ) -> Self {
        Self {
            timestamp: format_timestamp(timestamp),
            address: address.into(),
            total_hype_balance: spot_balance + staked_balance,
            hype_balances: HypeBalances {
                staked: staked_balance,
                unstaked_l1_spot: spot_balance,
            },
            summary: transfer_summary(ledger),
            hype_outgoing_transfers: ledger
                .outbound
                .iter()
                .map(|CounterpartyTotal { counterparty, amount }| OutgoingTransfer {
                    destination: counterparty.clone(),
                    amount: *amount,
                })
                .collect::<Vec<_>>()
                .into(),
            hype_ingoing_transfers: ingoing(ledger).into(),
            genesis: genesis(ledger).into(),
            spot_fill_count,
        }
    }
}

/// Inbound and genesis flows only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngoingReport {
    pub timestamp: String,
    pub address: String,
    pub analysis_type: String,
    pub summary: TransferSummary,
    pub genesis: Listing<GenesisEntry>,
    pub ingoing_transfers: Listing<IngoingTransfer>,
}

impl IngoingReport {
    pub fn new(timestamp: DateTime<Utc>, address: impl Into<String>, ledger: &LedgerSummary) -> Self {
        Self {
            timestamp: format_timestamp(timestamp),
            address: address.into(),
            analysis_type: INGOING_ANALYSIS_TYPE.to_string(),
            summary: transfer_summary(ledger),
            genesis: genesis(ledger).into(),
            ingoing_transfers: ingoing(ledger).into(),
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn transfer_summary(ledger: &LedgerSummary) -> TransferSummary {
    TransferSummary {
        total_genesis_received: ledger.genesis_total,
        total_ingoing_transfers: ledger.total_inbound(),
    }
}

fn ingoing(ledger: &LedgerSummary) -> Vec<IngoingTransfer> {
    ledger
        .inbound
        .iter()
        .map(|total| IngoingTransfer {
            sender: total.counterparty.clone(),
            amount: total.amount,
        })
        .collect()
}

fn genesis(ledger: &LedgerSummary) -> Vec<GenesisEntry> {
    if ledger.genesis_events == 0 {
        return Vec::new();
    }
    vec![GenesisEntry {
        label: GENESIS_LABEL.to_string(),
        amount: ledger.genesis_total,
    }]
}

/// Path of the report file for `prefix` written at `timestamp`.
pub fn report_path(dir: &Path, prefix: &str, timestamp: DateTime<Utc>) -> PathBuf {
    dir.join(format!("{prefix}_{}.json", timestamp.timestamp_millis()))
}

/// Write `report` as pretty JSON into `dir`, creating the directory if missing.
pub fn write_report<R>(
    dir: &Path,
    prefix: &str,
    timestamp: DateTime<Utc>,
    report: &R,
) -> Result<PathBuf, ReportError>
where
    R: Serialize,
{
    std::fs::create_dir_all(dir)?;

    let path = report_path(dir, prefix, timestamp);
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;

    info!(path = %path.display(), "report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ledger() -> LedgerSummary {
        LedgerSummary {
            inbound: vec![
                CounterpartyTotal { counterparty: "0xaaa".to_string(), amount: 30.0 },
                CounterpartyTotal { counterparty: "0xbbb".to_string(), amount: 12.0 },
            ],
            outbound: vec![CounterpartyTotal { counterparty: "0xccc".to_string(), amount: 5.0 }],
            genesis_total: 1000.0,
            genesis_events: 2,
        }
    }

    fn timestamp() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_123).unwrap()
    }

    #[test]
    fn test_details_report_layout() {
        let report = DetailsReport::new(timestamp(), "0xme", 10.5, 20.0, &ledger(), 3);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(
            value,
            json!({
                "timestamp": "2023-11-14T22:13:20.123Z",
                "address": "0xme",
                "totalHypeBalance": 30.5,
                "hypeBalances": {"staked": 20.0, "unstakedL1Spot": 10.5},
                "summary": {"totalGenesisReceived": 1000.0, "totalIngoingTransfers": 42.0},
                "hypeOutgoingTransfers": {
                    "count": 1,
                    "details": [{"destination": "0xccc", "amount": 5.0}]
                },
                "hypeIngoingTransfers": {
                    "count": 2,
                    "details": [
                        {"sender": "0xaaa", "amount": 30.0},
                        {"sender": "0xbbb", "amount": 12.0}
                    ]
                },
                "genesis": {"count": 1, "details": [{"label": "Genesis", "amount": 1000.0}]},
                "spotFillCount": 3
            })
        );
    }

    #[test]
    fn test_ingoing_report_layout() {
        let report = IngoingReport::new(timestamp(), "0xme", &LedgerSummary::default());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["analysisType"], "HYPE Ingoing & Genesis Only");
        assert_eq!(value["genesis"], json!({"count": 0, "details": []}));
        assert_eq!(value["ingoingTransfers"], json!({"count": 0, "details": []}));
        assert_eq!(value["summary"]["totalIngoingTransfers"], 0.0);

        let text = serde_json::to_string(&report.summary).unwrap();
        assert_eq!(text, r#"{"totalGenesisReceived":0.0,"totalIngoingTransfers":0.0}"#);
    }

    #[test]
    fn test_write_report_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested");

        let report = IngoingReport::new(timestamp(), "0xme", &ledger());
        let path = write_report(&dir, INGOING_PREFIX, timestamp(), &report).unwrap();

        assert_eq!(path.file_name().unwrap(), "hype_ingoing_1700000000123.json");
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["ingoingTransfers"]["count"], 2);
    }
}
