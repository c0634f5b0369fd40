/// HYPE Details
///
/// Collects spot balance, staking, fills and ledger updates for one address and
/// writes a details report.
///
/// Configure via HYPE_ADDRESS, HYPE_INFO_URL, HYPE_TOKEN, HYPE_OUTPUT_DIR and
/// HYPE_HTTP_TIMEOUT_SECS.
use chrono::Utc;
use hype_holders::{info::InfoClient, report::{DETAILS_PREFIX, write_report}};
use hype_holders_fetch::{
    DetailsInputs, FetchConfig, absent_on_error, build_details_report, init_logging,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = FetchConfig::from_env();
    info!(address = %config.address, url = %config.info_url, token = %config.token, "fetching details");

    let client = InfoClient::new(config.client_config())?;
    let address = config.address.as_str();

    let (spot_state, staking, fills, ledger) = tokio::join!(
        client.spot_state(address),
        client.delegator_summary(address),
        client.user_fills(address),
        client.ledger_updates(address),
    );

    let inputs = DetailsInputs {
        spot_state: absent_on_error("spotClearinghouseState", spot_state),
        staking: absent_on_error("delegatorSummary", staking),
        fills: absent_on_error("userFills", fills),
        ledger: absent_on_error("userNonFundingLedgerUpdates", ledger),
    };

    let now = Utc::now();
    let report = build_details_report(&config, now, &inputs);

    println!("{}", serde_json::to_string_pretty(&report)?);

    let path = write_report(&config.output_dir, DETAILS_PREFIX, now, &report)?;
    info!(path = %path.display(), "details report complete");

    Ok(())
}
