//! Partial views over Info API responses.
//!
//! Only the fields the reports need are modelled, and all of them default when absent.

use super::parse_amount;
use serde::{Deserialize, Serialize};

/// `spotClearinghouseState` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpotClearinghouseState {
    pub balances: Vec<SpotBalance>,
}

/// One coin balance within a [`SpotClearinghouseState`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpotBalance {
    pub coin: String,
    pub total: Option<String>,
    pub hold: Option<String>,
}

impl SpotClearinghouseState {
    /// Total balance of `coin`, 0 when the coin is absent or unparsable.
    pub fn balance_of(&self, coin: &str) -> f64 {
        self.balances
            .iter()
            .find(|balance| balance.coin == coin)
            .and_then(|balance| balance.total.as_deref())
            .and_then(parse_amount)
            .unwrap_or(0.0)
    }
}

/// `delegatorSummary` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DelegatorSummary {
    pub delegated: Option<String>,
    pub undelegated: Option<String>,
    pub total_pending_withdrawal: Option<String>,
    pub n_pending_withdrawals: Option<u64>,
}

impl DelegatorSummary {
    /// Delegated (staked) amount, 0 when absent or unparsable.
    pub fn delegated_amount(&self) -> f64 {
        self.delegated.as_deref().and_then(parse_amount).unwrap_or(0.0)
    }
}
