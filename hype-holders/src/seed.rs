//! Static dataset backing the dashboard.
//!
//! Ranks 1-8 are the documented top holders. Ranks 9-48 are filler generated from a
//! seeded RNG so every run with the same seed renders the same views.

use crate::record::{HolderRecord, HolderRecordBuilder};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::warn;

/// Number of generated filler records appended after the documented holders.
pub const GENERATED_RECORDS: u32 = 40;

/// Documented holders and the stable `rng_seed`-dependent filler.
pub fn seed_records(rng_seed: u64) -> Vec<HolderRecord> {
    let mut rng = StdRng::seed_from_u64(rng_seed);

    documented_holders()
        .into_iter()
        .chain((0..GENERATED_RECORDS).map(|i| generated_holder(&mut rng, 9 + i)))
        .filter_map(|builder| {
            builder
                .build()
                .inspect_err(|error| warn!(%error, "dropping invalid seed record"))
                .ok()
        })
        .collect()
}

fn documented_holders() -> Vec<HolderRecordBuilder> {
    vec![
        HolderRecord::builder(1, "0x43e9abea1910387c4292bca4b94de81462f8a251")
            .alias("HyperLabs")
            .staked(240_281_241.46)
            .open_interest(0.0)
            .unrealized_pnl(0.0)
            .genesis(238_000_000.0),
        HolderRecord::builder(2, "0xd57ecca444a9acb7208d286be439de12dd09de5d")
            .alias("Hyper Foundation")
            .staked(60_670_774.86)
            .open_interest(0.0)
            .unrealized_pnl(0.0)
            .genesis(60_000_000.0),
        HolderRecord::builder(3, "0x2222222222222222222222222222222222222222")
            .alias("HyperEVM Bridge")
            .liquid(54_775_432.46)
            .open_interest(0.0)
            .unrealized_pnl(0.0),
        HolderRecord::builder(4, "0xfefefefefefefefefefefefefefefefefefefefe")
            .alias("Assistance Fund")
            .liquid(36_089_065.22)
            .open_interest(0.0)
            .unrealized_pnl(0.0),
        HolderRecord::builder(5, "0x393d0b87ed38fc779fd9611144ae649ba6082109")
            .staked(25_007_700.77)
            .open_interest(5_000_000.0)
            .unrealized_pnl(120_000.0),
        HolderRecord::builder(6, "0xa20fcfa0507fe762011962cc581b95bbbc3bbdba")
            .staked(3_061_514.12)
            .open_interest(0.0)
            .unrealized_pnl(0.0)
            .genesis(3_000_000.0),
        HolderRecord::builder(7, "0xe44bd27c9f10fa2f89fdb3ab4b4f0e460da29ea8")
            .staked(2_695_143.09)
            .open_interest(250_000.0)
            .unrealized_pnl(-5_000.0),
        HolderRecord::builder(8, "0x51156f7002c4f74f4956c9e0f2b7bfb6e9dbfac2")
            .liquid(2_429_107.78)
            .open_interest(0.0)
            .unrealized_pnl(0.0),
    ]
}

fn generated_holder(rng: &mut StdRng, rank: u32) -> HolderRecordBuilder {
    let is_whale = rng.random_bool(0.1);
    let is_trader = rng.random_bool(0.6);

    let liquid = if is_whale {
        rng.random::<f64>() * 500_000.0 + 50_000.0
    } else {
        rng.random::<f64>() * 5_000.0 + 100.0
    };
    let staked = if is_whale { liquid * 0.8 } else { 0.0 };

    // Traders carry up to $5M OI as whales, $50k otherwise, with PnL within +/- 10%
    let open_interest = match (is_trader, is_whale) {
        (false, _) => 0.0,
        (true, true) => rng.random::<f64>() * 5_000_000.0,
        (true, false) => rng.random::<f64>() * 50_000.0,
    };
    let pnl = (rng.random::<f64>() - 0.5) * open_interest * 0.2;

    let address_bytes: [u8; 20] = rng.random();
    let address = address_bytes
        .iter()
        .fold(String::from("0x"), |mut acc, byte| {
            acc.push_str(&format!("{byte:02x}"));
            acc
        });

    let builder = HolderRecord::builder(rank, address)
        .liquid(liquid)
        .staked(staked)
        .open_interest(open_interest)
        .unrealized_pnl(pnl);

    if rng.random_bool(0.5) {
        builder.genesis(rng.random::<f64>() * 5_000.0)
    } else {
        builder
    }
}
