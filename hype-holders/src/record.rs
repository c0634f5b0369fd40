//! Holder position snapshots.
//!
//! A [`HolderRecord`] is immutable once built: `total_balance` is always derived from
//! `liquid_balance + staked_balance`, so the two can never disagree.

use crate::error::RecordError;
use serde::{Deserialize, Serialize};

/// Relative tolerance used when an explicit total is supplied alongside its parts.
const TOTAL_TOLERANCE: f64 = 1e-9;

/// One tracked address's position snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHolderRecord", rename_all = "camelCase")]
pub struct HolderRecord {
    rank: u32,
    address: String,
    alias: Option<String>,
    liquid_balance: f64,
    staked_balance: f64,
    total_balance: f64,
    open_interest: Option<f64>,
    unrealized_pnl: Option<f64>,
    is_genesis_recipient: bool,
    genesis_allocation: f64,
}

impl HolderRecord {
    /// Start building a record for `address` displayed at 1-based `rank`.
    pub fn builder(rank: u32, address: impl Into<String>) -> HolderRecordBuilder {
        HolderRecordBuilder::new(rank, address)
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn liquid_balance(&self) -> f64 {
        self.liquid_balance
    }

    pub fn staked_balance(&self) -> f64 {
        self.staked_balance
    }

    pub fn total_balance(&self) -> f64 {
        self.total_balance
    }

    pub fn open_interest(&self) -> Option<f64> {
        self.open_interest
    }

    pub fn unrealized_pnl(&self) -> Option<f64> {
        self.unrealized_pnl
    }

    pub fn is_genesis_recipient(&self) -> bool {
        self.is_genesis_recipient
    }

    pub fn genesis_allocation(&self) -> f64 {
        self.genesis_allocation
    }

    /// Official/known addresses carry a non-empty alias.
    pub fn is_official(&self) -> bool {
        self.alias.is_some()
    }

    /// Open interest with absence treated as zero.
    pub fn open_interest_or_zero(&self) -> f64 {
        self.open_interest.unwrap_or(0.0)
    }

    /// True if the account holds a non-zero derivatives position.
    pub fn has_perp_position(&self) -> bool {
        self.open_interest_or_zero() > 0.0
    }
}

/// Builder for [`HolderRecord`], validated in [`HolderRecordBuilder::build`].
#[derive(Debug, Clone)]
pub struct HolderRecordBuilder {
    rank: u32,
    address: String,
    alias: Option<String>,
    liquid: f64,
    staked: f64,
    open_interest: Option<f64>,
    unrealized_pnl: Option<f64>,
    genesis: Option<f64>,
}

impl HolderRecordBuilder {
    fn new(rank: u32, address: impl Into<String>) -> Self {
        Self {
            rank,
            address: address.into(),
            alias: None,
            liquid: 0.0,
            staked: 0.0,
            open_interest: None,
            unrealized_pnl: None,
            genesis: None,
        }
    }

    /// Label marking the address as official. An empty label is ignored.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = (!alias.is_empty()).then_some(alias);
        self
    }

    pub fn liquid(mut self, amount: f64) -> Self {
        self.liquid = amount;
        self
    }

    pub fn staked(mut self, amount: f64) -> Self {
        self.staked = amount;
        self
    }

    pub fn open_interest(mut self, notional: f64) -> Self {
        self.open_interest = Some(notional);
        self
    }

    pub fn unrealized_pnl(mut self, pnl: f64) -> Self {
        self.unrealized_pnl = Some(pnl);
        self
    }

    /// Mark the address as a genesis recipient that received `amount`.
    pub fn genesis(mut self, amount: f64) -> Self {
        self.genesis = Some(amount);
        self
    }

    pub fn build(self) -> Result<HolderRecord, RecordError> {
        if self.rank == 0 {
            return Err(RecordError::InvalidRank(self.rank));
        }
        if self.address.trim().is_empty() {
            return Err(RecordError::EmptyAddress);
        }

        let check = |field: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(RecordError::InvalidAmount {
                    address: self.address.clone(),
                    field,
                    value,
                })
            }
        };

        let liquid = check("liquid balance", self.liquid)?;
        let staked = check("staked balance", self.staked)?;
        let open_interest = self
            .open_interest
            .map(|oi| check("open interest", oi))
            .transpose()?;
        let genesis_allocation = self
            .genesis
            .map(|amount| check("genesis allocation", amount))
            .transpose()?;

        if let Some(pnl) = self.unrealized_pnl.filter(|pnl| !pnl.is_finite()) {
            return Err(RecordError::InvalidAmount {
                address: self.address,
                field: "unrealized pnl",
                value: pnl,
            });
        }

        Ok(HolderRecord {
            rank: self.rank,
            address: self.address,
            alias: self.alias,
            liquid_balance: liquid,
            staked_balance: staked,
            total_balance: liquid + staked,
            open_interest,
            unrealized_pnl: self.unrealized_pnl,
            is_genesis_recipient: genesis_allocation.is_some(),
            genesis_allocation: genesis_allocation.unwrap_or(0.0),
        })
    }
}

/// Wire shape of a [`HolderRecord`]. An explicit `totalBalance` is optional but, when
/// present, must agree with the sum of its parts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHolderRecord {
    rank: u32,
    address: String,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    liquid_balance: f64,
    #[serde(default)]
    staked_balance: f64,
    #[serde(default)]
    total_balance: Option<f64>,
    #[serde(default)]
    open_interest: Option<f64>,
    #[serde(default)]
    unrealized_pnl: Option<f64>,
    #[serde(default)]
    is_genesis_recipient: bool,
    #[serde(default)]
    genesis_allocation: f64,
}

impl TryFrom<RawHolderRecord> for HolderRecord {
    type Error = RecordError;

    fn try_from(raw: RawHolderRecord) -> Result<Self, Self::Error> {
        let mut builder = HolderRecord::builder(raw.rank, raw.address)
            .liquid(raw.liquid_balance)
            .staked(raw.staked_balance);

        if let Some(alias) = raw.alias {
            builder = builder.alias(alias);
        }
        if let Some(oi) = raw.open_interest {
            builder = builder.open_interest(oi);
        }
        if let Some(pnl) = raw.unrealized_pnl {
            builder = builder.unrealized_pnl(pnl);
        }
        if raw.is_genesis_recipient {
            builder = builder.genesis(raw.genesis_allocation);
        }

        let record = builder.build()?;

        if let Some(total) = raw.total_balance {
            let expected = record.total_balance;
            if (total - expected).abs() > TOTAL_TOLERANCE * expected.abs().max(1.0) {
                return Err(RecordError::InconsistentTotal {
                    address: record.address,
                    liquid: record.liquid_balance,
                    staked: record.staked_balance,
                    total,
                });
            }
        }

        Ok(record)
    }
}
