/// Aggregations over a holder record set
///
/// Every function here is pure: it reads an immutable slice and returns a derived value.
use crate::{
    cluster::{ClusterTag, classify},
    record::HolderRecord,
    threshold::ThresholdConfig,
};
use serde::Serialize;

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Sum of `total_balance` over the set (0 for an empty set).
pub fn sum_total_balance<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a HolderRecord>,
{
    records
        .into_iter()
        .fold(0.0, |acc, record| acc + record.total_balance())
}

/// Sum of `staked_balance` over the set.
pub fn sum_staked_balance<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a HolderRecord>,
{
    records
        .into_iter()
        .fold(0.0, |acc, record| acc + record.staked_balance())
}

/// Percentage of the tracked total that is staked, in `[0, 100]`.
///
/// Returns 0 when nothing is tracked.
pub fn staking_ratio(records: &[HolderRecord]) -> f64 {
    let total = sum_total_balance(records);
    if total > 0.0 {
        (sum_staked_balance(records) / total) * 100.0
    } else {
        0.0
    }
}

/// Total balance held by the members of `tag`.
pub fn cluster_total(records: &[HolderRecord], tag: ClusterTag, thresholds: &ThresholdConfig) -> f64 {
    sum_total_balance(classify(records, tag, thresholds))
}

/// Number of genesis recipients in the set.
pub fn genesis_count(records: &[HolderRecord]) -> usize {
    records.iter().filter(|r| r.is_genesis_recipient()).count()
}

/// Share of records that received a genesis allocation, in `[0, 100]`.
pub fn genesis_retention(records: &[HolderRecord]) -> f64 {
    if records.is_empty() {
        0.0
    } else {
        (genesis_count(records) as f64 / records.len() as f64) * 100.0
    }
}

/// First `n` records of a view.
pub fn top_n<'a>(records: &[&'a HolderRecord], n: usize) -> Vec<&'a HolderRecord> {
    records.iter().take(n).copied().collect()
}

/// Scale `x` to B / M / K with two fractional digits, e.g. `1234567 -> "1.23M"`.
///
/// The unit is chosen on the absolute value; the sign is kept in the output.
pub fn format_magnitude(x: f64) -> String {
    let magnitude = x.abs();
    if magnitude >= BILLION {
        format!("{:.2}B", x / BILLION)
    } else if magnitude >= MILLION {
        format!("{:.2}M", x / MILLION)
    } else if magnitude >= THOUSAND {
        format!("{:.2}K", x / THOUSAND)
    } else {
        format!("{:.2}", x)
    }
}

/// First 6 characters + `"..."` + last 4 characters.
///
/// Empty input yields an empty string. Inputs shorter than 10 characters are not padded,
/// so prefix and suffix may overlap.
pub fn truncate_address(addr: &str) -> String {
    if addr.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = addr.chars().collect();
    let prefix: String = chars[..chars.len().min(6)].iter().collect();
    let suffix: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{prefix}...{suffix}")
}

/// Spot holdings split between official addresses and the three spot tiers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SpotDistribution {
    pub official: f64,
    pub whale: f64,
    pub mid: f64,
    pub retail: f64,
}

impl SpotDistribution {
    pub fn compute(records: &[HolderRecord], thresholds: &ThresholdConfig) -> Self {
        Self {
            official: cluster_total(records, ClusterTag::Official, thresholds),
            whale: cluster_total(records, ClusterTag::SpotWhale, thresholds),
            mid: cluster_total(records, ClusterTag::SpotMid, thresholds),
            retail: cluster_total(records, ClusterTag::SpotRetail, thresholds),
        }
    }

    /// Sum of every slice. Equals the tracked total since the slices partition the set.
    pub fn total(&self) -> f64 {
        self.official + self.whale + self.mid + self.retail
    }

    /// `part` as a percentage of [`SpotDistribution::total`] (0 when the total is 0).
    pub fn share(&self, part: f64) -> f64 {
        let total = self.total();
        if total > 0.0 { (part / total) * 100.0 } else { 0.0 }
    }

    /// Labelled slices in display order.
    pub fn slices(&self) -> [(&'static str, f64); 4] {
        [
            ("Official", self.official),
            ("Whales", self.whale),
            ("Mid Tier", self.mid),
            ("Retail", self.retail),
        ]
    }
}

/// Headline figures shown above every dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashboardSummary {
    pub total_tracked: f64,
    pub staking_ratio: f64,
    pub genesis_retention: f64,
    pub record_count: usize,
    pub distribution: SpotDistribution,
}

impl DashboardSummary {
    pub fn compute(records: &[HolderRecord], thresholds: &ThresholdConfig) -> Self {
        Self {
            total_tracked: sum_total_balance(records),
            staking_ratio: staking_ratio(records),
            genesis_retention: genesis_retention(records),
            record_count: records.len(),
            distribution: SpotDistribution::compute(records, thresholds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(rank: u32, liquid: f64, staked: f64) -> HolderRecord {
        HolderRecord::builder(rank, format!("0x{rank:040x}"))
            .liquid(liquid)
            .staked(staked)
            .build()
            .unwrap()
    }

    #[test]
    fn test_format_magnitude() {
        struct TestCase {
            input: f64,
            expected: &'static str,
        }

        let tests = vec![
            TestCase {
                // TC0: millions
                input: 1_500_000.0,
                expected: "1.50M",
            },
            TestCase {
                // TC1: unscaled
                input: 999.0,
                expected: "999.00",
            },
            TestCase {
                // TC2: billions
                input: 2_500_000_000.0,
                expected: "2.50B",
            },
            TestCase {
                // TC3: rounding
                input: 1_234_567.0,
                expected: "1.23M",
            },
            TestCase {
                // TC4: thousands boundary
                input: 1_000.0,
                expected: "1.00K",
            },
            TestCase {
                // TC5: negative keeps sign, scaled on magnitude
                input: -5_000.0,
                expected: "-5.00K",
            },
            TestCase {
                // TC6: small negative stays unscaled
                input: -12.5,
                expected: "-12.50",
            },
            TestCase {
                // TC7: zero
                input: 0.0,
                expected: "0.00",
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = format_magnitude(test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_truncate_address() {
        struct TestCase {
            input: &'static str,
            expected: &'static str,
        }

        let tests = vec![
            TestCase {
                // TC0: full address
                input: "0x43e9abea1910387c4292bca4b94de81462f8a251",
                expected: "0x43e9...a251",
            },
            TestCase {
                // TC1: empty
                input: "",
                expected: "",
            },
            TestCase {
                // TC2: exactly 10 characters
                input: "0123456789",
                expected: "012345...6789",
            },
            TestCase {
                // TC3: short input overlaps
                input: "0xabc",
                expected: "0xabc...xabc",
            },
            TestCase {
                // TC4: multi-byte characters do not panic
                input: "ウォレットアドレス例です",
                expected: "ウォレットア...ス例です",
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = truncate_address(test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_staking_ratio_guards_empty_and_zero() {
        assert_eq!(staking_ratio(&[]), 0.0);

        let zero = vec![holder(1, 0.0, 0.0)];
        let ratio = staking_ratio(&zero);
        assert_eq!(ratio, 0.0);
        assert!(!ratio.is_nan());
    }

    #[test]
    fn test_staking_ratio() {
        let records = vec![holder(1, 25.0, 75.0), holder(2, 100.0, 0.0)];
        assert!((staking_ratio(&records) - 37.5).abs() < 1e-12);
        assert_eq!(sum_total_balance(&records), 200.0);

        let all_staked = vec![holder(1, 0.0, 10.0)];
        assert_eq!(staking_ratio(&all_staked), 100.0);
    }

    #[test]
    fn test_genesis_retention() {
        assert_eq!(genesis_retention(&[]), 0.0);

        let records = vec![
            HolderRecord::builder(1, "0xa").genesis(10.0).build().unwrap(),
            HolderRecord::builder(2, "0xb").build().unwrap(),
            HolderRecord::builder(3, "0xc").genesis(0.0).build().unwrap(),
            HolderRecord::builder(4, "0xd").build().unwrap(),
        ];
        assert_eq!(genesis_count(&records), 2);
        assert_eq!(genesis_retention(&records), 50.0);
    }

    #[test]
    fn test_distribution_partitions_total() {
        let thresholds = ThresholdConfig::default();
        let records = crate::seed::seed_records(42);
        let summary = DashboardSummary::compute(&records, &thresholds);

        let total = summary.distribution.total();
        assert!((total - summary.total_tracked).abs() < 1e-6 * total);

        let shares: f64 = summary
            .distribution
            .slices()
            .iter()
            .map(|(_, value)| summary.distribution.share(*value))
            .sum();
        assert!((shares - 100.0).abs() < 1e-9);
        assert_eq!(summary.record_count, records.len());
    }

    #[test]
    fn test_empty_set_sums_are_positive_zero() {
        let empty: Vec<HolderRecord> = Vec::new();
        assert!(sum_total_balance(&empty).is_sign_positive());
        assert!(sum_staked_balance(&empty).is_sign_positive());
        assert_eq!(format_magnitude(sum_total_balance(&empty)), "0.00");

        let summary = DashboardSummary::compute(&[], &ThresholdConfig::default());
        assert_eq!(format_magnitude(summary.total_tracked), "0.00");
    }

    #[test]
    fn test_empty_distribution_share() {
        let distribution = SpotDistribution::compute(&[], &ThresholdConfig::default());
        assert_eq!(distribution.total(), 0.0);
        assert_eq!(distribution.share(0.0), 0.0);
    }

    #[test]
    fn test_top_n() {
        let records = vec![holder(1, 1.0, 0.0), holder(2, 2.0, 0.0), holder(3, 3.0, 0.0)];
        let view: Vec<&HolderRecord> = records.iter().collect();

        let top: Vec<u32> = top_n(&view, 2).iter().map(|r| r.rank()).collect();
        assert_eq!(top, vec![1, 2]);
        assert_eq!(top_n(&view, 10).len(), 3);
    }
}
