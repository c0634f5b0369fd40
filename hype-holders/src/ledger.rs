//! Ledger-delta reduction for a single tracked address.
//!
//! Raw `userNonFundingLedgerUpdates` entries are validated once at the boundary into
//! [`LedgerDelta`]s, resolved into direction-aware [`TransferLedgerEntry`]s, then folded
//! into a finished [`LedgerSummary`].

use crate::info::parse_amount;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Label used for the single genesis bucket in reports.
pub const GENESIS_LABEL: &str = "Genesis";

/// One raw ledger update as returned by the Info API. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerUpdate {
    pub time: Option<i64>,
    pub hash: Option<String>,
    pub delta: Option<RawDelta>,
}

/// Raw `delta` payload of a [`LedgerUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawDelta {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub token: Option<String>,
    pub amount: Option<RawAmount>,
    pub user: Option<String>,
    pub destination: Option<String>,
}

/// Amounts arrive as decimal strings, occasionally as bare numbers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawAmount {
    Text(String),
    Number(f64),
}

impl RawAmount {
    /// Positive finite value, if any.
    pub fn positive(&self) -> Option<f64> {
        let value = match self {
            RawAmount::Text(text) => parse_amount(text)?,
            RawAmount::Number(number) => *number,
        };
        (value.is_finite() && value > 0.0).then_some(value)
    }
}

impl LedgerUpdate {
    /// Decode a ledger response, tolerating a non-array body and malformed entries.
    pub fn parse_all(value: serde_json::Value) -> Vec<LedgerUpdate> {
        let serde_json::Value::Array(entries) = value else {
            debug!("ledger response is not an array, treating as empty");
            return Vec::new();
        };

        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<LedgerUpdate>(entry) {
                Ok(update) => Some(update),
                Err(error) => {
                    debug!(%error, "skipping malformed ledger update");
                    None
                }
            })
            .collect()
    }
}

/// Ledger update type as understood by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LedgerKind {
    /// `spotGenesis`: initial allocation.
    Genesis,
    /// `spotTransfer`: either direction.
    Transfer,
    /// `send`: only counted inbound.
    Send,
    Other,
}

impl LedgerKind {
    pub fn from_api(kind: &str) -> Self {
        match kind {
            "spotGenesis" => LedgerKind::Genesis,
            "spotTransfer" => LedgerKind::Transfer,
            "send" => LedgerKind::Send,
            _ => LedgerKind::Other,
        }
    }
}

/// A [`LedgerUpdate`] that passed boundary validation for one asset token.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerDelta {
    /// Event hash. Events without one share a single identifier.
    pub event_id: Option<String>,
    pub kind: LedgerKind,
    pub amount: f64,
    pub user: Option<String>,
    pub destination: Option<String>,
}

impl LedgerDelta {
    /// Validate `update` for `token`.
    ///
    /// Returns `None` when the delta is missing, the token differs, or the amount is not a
    /// positive finite number.
    pub fn from_update(update: &LedgerUpdate, token: &str) -> Option<Self> {
        let delta = update.delta.as_ref()?;
        if delta.token.as_deref() != Some(token) {
            return None;
        }

        let amount = delta.amount.as_ref()?.positive()?;
        Some(Self {
            event_id: update.hash.clone(),
            kind: delta.kind.as_deref().map(LedgerKind::from_api).unwrap_or(LedgerKind::Other),
            amount,
            user: delta.user.clone().filter(|user| !user.is_empty()),
            destination: delta.destination.clone().filter(|dest| !dest.is_empty()),
        })
    }

    /// Resolve direction relative to `tracked`.
    pub fn entries(&self, tracked: &str, mode: ReduceMode) -> Vec<TransferLedgerEntry> {
        let is_tracked = |address: &Option<String>| {
            address
                .as_deref()
                .is_some_and(|address| address.eq_ignore_ascii_case(tracked))
        };
        let entry = |counterparty: &str, kind: EntryKind| TransferLedgerEntry {
            event_id: self.event_id.clone(),
            counterparty: counterparty.to_lowercase(),
            amount: self.amount,
            kind,
        };

        let mut entries = Vec::new();
        match self.kind {
            LedgerKind::Genesis => entries.push(entry(GENESIS_LABEL, EntryKind::Genesis)),
            LedgerKind::Transfer | LedgerKind::Send => {
                if mode == ReduceMode::Details && self.kind == LedgerKind::Transfer && is_tracked(&self.user) {
                    if let Some(destination) = &self.destination {
                        entries.push(entry(destination, EntryKind::TransferOut));
                    }
                }
                if is_tracked(&self.destination) {
                    if let Some(sender) = &self.user {
                        entries.push(entry(sender, EntryKind::TransferIn));
                    }
                }
            }
            LedgerKind::Other => {}
        }
        entries
    }
}

/// Which outputs a reduction pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReduceMode {
    /// Genesis, inbound and outbound transfers.
    #[default]
    Details,
    /// Genesis and inbound transfers only.
    IngoingOnly,
}

/// Direction of a resolved ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Genesis,
    TransferIn,
    TransferOut,
}

/// One event's contribution relative to the tracked address.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferLedgerEntry {
    pub event_id: Option<String>,
    pub counterparty: String,
    pub amount: f64,
    pub kind: EntryKind,
}

/// Summed amount for one counterparty.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CounterpartyTotal {
    pub counterparty: String,
    pub amount: f64,
}

/// Finished result of a reduction pass. Mappings are sorted by descending amount.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub inbound: Vec<CounterpartyTotal>,
    pub outbound: Vec<CounterpartyTotal>,
    pub genesis_total: f64,
    pub genesis_events: usize,
}

impl LedgerSummary {
    pub fn total_inbound(&self) -> f64 {
        self.inbound.iter().fold(0.0, |acc, total| acc + total.amount)
    }

    pub fn total_outbound(&self) -> f64 {
        self.outbound.iter().fold(0.0, |acc, total| acc + total.amount)
    }
}

/// Folds ledger updates for one tracked address and asset token.
#[derive(Debug, Clone)]
pub struct LedgerReducer {
    tracked: String,
    token: String,
    mode: ReduceMode,
}

impl LedgerReducer {
    pub fn new(tracked: impl Into<String>, token: impl Into<String>, mode: ReduceMode) -> Self {
        Self {
            tracked: tracked.into(),
            token: token.into(),
            mode,
        }
    }

    /// Reduce `updates` into a [`LedgerSummary`].
    ///
    /// An event identifier is consumed once the event contributes to any output; later
    /// events carrying the same identifier are skipped.
    pub fn reduce<'a, I>(&self, updates: I) -> LedgerSummary
    where
        I: IntoIterator<Item = &'a LedgerUpdate>,
    {
        updates
            .into_iter()
            .filter_map(|update| LedgerDelta::from_update(update, &self.token))
            .fold(LedgerAccumulator::default(), |acc, delta| {
                acc.apply(delta.entries(&self.tracked, self.mode))
            })
            .finish()
    }
}

#[derive(Debug, Default)]
struct LedgerAccumulator {
    seen: HashSet<Option<String>>,
    inbound: HashMap<String, f64>,
    outbound: HashMap<String, f64>,
    genesis_total: f64,
    genesis_events: usize,
}

impl LedgerAccumulator {
    fn apply(mut self, entries: Vec<TransferLedgerEntry>) -> Self {
        let Some(event_id) = entries.first().map(|entry| entry.event_id.clone()) else {
            return self;
        };
        if !self.seen.insert(event_id) {
            return self;
        }

        for entry in entries {
            match entry.kind {
                EntryKind::Genesis => {
                    self.genesis_total += entry.amount;
                    self.genesis_events += 1;
                }
                EntryKind::TransferIn => {
                    *self.inbound.entry(entry.counterparty).or_default() += entry.amount;
                }
                EntryKind::TransferOut => {
                    *self.outbound.entry(entry.counterparty).or_default() += entry.amount;
                }
            }
        }
        self
    }

    fn finish(self) -> LedgerSummary {
        LedgerSummary {
            inbound: sorted_totals(self.inbound),
            outbound: sorted_totals(self.outbound),
            genesis_total: self.genesis_total,
            genesis_events: self.genesis_events,
        }
    }
}

fn sorted_totals(totals: HashMap<String, f64>) -> Vec<CounterpartyTotal> {
    totals
        .into_iter()
        .sorted_by(|(a_key, a), (b_key, b)| b.total_cmp(a).then_with(|| a_key.cmp(b_key)))
        .map(|(counterparty, amount)| CounterpartyTotal { counterparty, amount })
        .collect()
}
