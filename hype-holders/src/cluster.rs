//! Cluster tags and the classifier that partitions a record set into them.

use crate::{record::HolderRecord, threshold::ThresholdConfig};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Market a tiered cluster belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
pub enum Market {
    #[display("SPOT")]
    Spot,
    #[display("PERP")]
    Perp,
}

impl Market {
    /// The other market, used by the dashboard's market toggle.
    pub fn toggle(self) -> Self {
        match self {
            Market::Spot => Market::Perp,
            Market::Perp => Market::Spot,
        }
    }
}

/// Size tier within a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
pub enum Tier {
    #[display("WHALE")]
    Whale,
    #[display("MID")]
    Mid,
    #[display("RETAIL")]
    Retail,
}

/// Closed set of holder clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterTag {
    #[display("ALL")]
    All,
    #[display("OFFICIAL")]
    Official,
    #[display("SPOT_WHALE")]
    SpotWhale,
    #[display("SPOT_MID")]
    SpotMid,
    #[display("SPOT_RETAIL")]
    SpotRetail,
    #[display("PERP_WHALE")]
    PerpWhale,
    #[display("PERP_MID")]
    PerpMid,
    #[display("PERP_RETAIL")]
    PerpRetail,
}

impl ClusterTag {
    /// Every tag in navigation order.
    pub const ALL_TAGS: [ClusterTag; 8] = [
        ClusterTag::All,
        ClusterTag::Official,
        ClusterTag::SpotWhale,
        ClusterTag::SpotMid,
        ClusterTag::SpotRetail,
        ClusterTag::PerpWhale,
        ClusterTag::PerpMid,
        ClusterTag::PerpRetail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterTag::All => "ALL",
            ClusterTag::Official => "OFFICIAL",
            ClusterTag::SpotWhale => "SPOT_WHALE",
            ClusterTag::SpotMid => "SPOT_MID",
            ClusterTag::SpotRetail => "SPOT_RETAIL",
            ClusterTag::PerpWhale => "PERP_WHALE",
            ClusterTag::PerpMid => "PERP_MID",
            ClusterTag::PerpRetail => "PERP_RETAIL",
        }
    }

    /// Dashboard heading for the view.
    pub fn title(&self) -> &'static str {
        match self {
            ClusterTag::All => "Ecosystem Overview",
            ClusterTag::Official => "Official & Project",
            ClusterTag::SpotWhale => "Spot Market - Whales",
            ClusterTag::SpotMid => "Spot Market - Mid Tier",
            ClusterTag::SpotRetail => "Spot Market - Retail",
            ClusterTag::PerpWhale => "Perp Market - Whales",
            ClusterTag::PerpMid => "Perp Market - Pro Traders",
            ClusterTag::PerpRetail => "Perp Market - High Frequency / Retail",
        }
    }

    pub fn market(&self) -> Option<Market> {
        match self {
            ClusterTag::SpotWhale | ClusterTag::SpotMid | ClusterTag::SpotRetail => {
                Some(Market::Spot)
            }
            ClusterTag::PerpWhale | ClusterTag::PerpMid | ClusterTag::PerpRetail => {
                Some(Market::Perp)
            }
            ClusterTag::All | ClusterTag::Official => None,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            ClusterTag::SpotWhale | ClusterTag::PerpWhale => Some(Tier::Whale),
            ClusterTag::SpotMid | ClusterTag::PerpMid => Some(Tier::Mid),
            ClusterTag::SpotRetail | ClusterTag::PerpRetail => Some(Tier::Retail),
            ClusterTag::All | ClusterTag::Official => None,
        }
    }

    pub fn is_perp(&self) -> bool {
        self.market() == Some(Market::Perp)
    }

    /// Tag for `(market, tier)`.
    pub fn tiered(market: Market, tier: Tier) -> Self {
        match (market, tier) {
            (Market::Spot, Tier::Whale) => ClusterTag::SpotWhale,
            (Market::Spot, Tier::Mid) => ClusterTag::SpotMid,
            (Market::Spot, Tier::Retail) => ClusterTag::SpotRetail,
            (Market::Perp, Tier::Whale) => ClusterTag::PerpWhale,
            (Market::Perp, Tier::Mid) => ClusterTag::PerpMid,
            (Market::Perp, Tier::Retail) => ClusterTag::PerpRetail,
        }
    }

    /// Same tier in `market`. Untiered tags map to that market's whale tier.
    pub fn counterpart(&self, market: Market) -> Self {
        Self::tiered(market, self.tier().unwrap_or(Tier::Whale))
    }

    /// Membership predicate for this cluster.
    ///
    /// Lower bounds are inclusive and upper bounds exclusive, so a boundary value belongs
    /// to the higher tier. Aliased records never fall in a spot tier, and records with
    /// absent or zero open interest never fall in a perp tier.
    pub fn contains(&self, record: &HolderRecord, thresholds: &ThresholdConfig) -> bool {
        let total = record.total_balance();
        let oi = record.open_interest_or_zero();

        match self {
            ClusterTag::All => true,
            ClusterTag::Official => record.is_official(),
            ClusterTag::SpotWhale => {
                !record.is_official() && total >= thresholds.spot_whale_floor()
            }
            ClusterTag::SpotMid => {
                !record.is_official()
                    && total >= thresholds.spot_mid_floor()
                    && total < thresholds.spot_whale_floor()
            }
            ClusterTag::SpotRetail => !record.is_official() && total < thresholds.spot_mid_floor(),
            ClusterTag::PerpWhale => oi > 0.0 && oi >= thresholds.perp_whale_oi_floor(),
            ClusterTag::PerpMid => {
                oi > 0.0
                    && oi >= thresholds.perp_mid_oi_floor()
                    && oi < thresholds.perp_whale_oi_floor()
            }
            ClusterTag::PerpRetail => oi > 0.0 && oi < thresholds.perp_mid_oi_floor(),
        }
    }
}

impl FromStr for ClusterTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClusterTag::ALL_TAGS
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown cluster tag: {s}"))
    }
}

/// Order-preserving filter of `records` down to members of `tag`.
pub fn classify<'a>(
    records: &'a [HolderRecord],
    tag: ClusterTag,
    thresholds: &ThresholdConfig,
) -> Vec<&'a HolderRecord> {
    records
        .iter()
        .filter(|record| tag.contains(record, thresholds))
        .collect()
}

/// Member counts for every [`ClusterTag`] over one record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Partition {
    counts: [usize; 8],
}

impl Partition {
    pub fn compute(records: &[HolderRecord], thresholds: &ThresholdConfig) -> Self {
        let mut counts = [0usize; 8];
        for record in records {
            for (count, tag) in counts.iter_mut().zip(ClusterTag::ALL_TAGS) {
                if tag.contains(record, thresholds) {
                    *count += 1;
                }
            }
        }
        Self { counts }
    }

    pub fn count(&self, tag: ClusterTag) -> usize {
        ClusterTag::ALL_TAGS
            .iter()
            .position(|candidate| *candidate == tag)
            .map(|index| self.counts[index])
            .unwrap_or(0)
    }
}
