/// HYPE Ingoing
///
/// Genesis allocations and inbound transfers for one address, outbound flows ignored.
use chrono::Utc;
use hype_holders::{info::InfoClient, report::{INGOING_PREFIX, write_report}};
use hype_holders_fetch::{FetchConfig, absent_on_error, build_ingoing_report, init_logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = FetchConfig::from_env();
    info!(address = %config.address, token = %config.token, "fetching ingoing flows");

    let client = InfoClient::new(config.client_config())?;
    let ledger = absent_on_error(
        "userNonFundingLedgerUpdates",
        client.ledger_updates(&config.address).await,
    );

    let now = Utc::now();
    let report = build_ingoing_report(&config, now, ledger.as_deref());
    info!(
        genesis = report.summary.total_genesis_received,
        ingoing = report.summary.total_ingoing_transfers,
        senders = report.ingoing_transfers.count,
        "ledger reduced"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    write_report(&config.output_dir, INGOING_PREFIX, now, &report)?;

    Ok(())
}
