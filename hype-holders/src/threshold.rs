use crate::error::ThresholdError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default spot whale floor: 1M+ HYPE.
pub const DEFAULT_SPOT_WHALE_FLOOR: f64 = 1_000_000.0;
/// Default spot mid floor: 10k - 1M HYPE.
pub const DEFAULT_SPOT_MID_FLOOR: f64 = 10_000.0;
/// Default perp whale floor: $1M+ open interest.
pub const DEFAULT_PERP_WHALE_OI_FLOOR: f64 = 1_000_000.0;
/// Default perp mid floor: $10k - $1M open interest.
pub const DEFAULT_PERP_MID_OI_FLOOR: f64 = 10_000.0;

/// Numeric cutoffs separating whale/mid/retail tiers.
///
/// Lower bounds are inclusive, upper bounds exclusive, and each mid floor is strictly
/// below its whale floor so tiers never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    spot_whale_floor: f64,
    spot_mid_floor: f64,
    perp_whale_oi_floor: f64,
    perp_mid_oi_floor: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            spot_whale_floor: DEFAULT_SPOT_WHALE_FLOOR,
            spot_mid_floor: DEFAULT_SPOT_MID_FLOOR,
            perp_whale_oi_floor: DEFAULT_PERP_WHALE_OI_FLOOR,
            perp_mid_oi_floor: DEFAULT_PERP_MID_OI_FLOOR,
        }
    }
}

impl ThresholdConfig {
    pub fn new(
        spot_whale_floor: f64,
        spot_mid_floor: f64,
        perp_whale_oi_floor: f64,
        perp_mid_oi_floor: f64,
    ) -> Result<Self, ThresholdError> {
        for (name, value) in [
            ("spot whale floor", spot_whale_floor),
            ("spot mid floor", spot_mid_floor),
            ("perp whale OI floor", perp_whale_oi_floor),
            ("perp mid OI floor", perp_mid_oi_floor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ThresholdError::InvalidFloor { name, value });
            }
        }

        if spot_mid_floor >= spot_whale_floor {
            return Err(ThresholdError::Inverted {
                market: "spot",
                mid: spot_mid_floor,
                whale: spot_whale_floor,
            });
        }

        if perp_mid_oi_floor >= perp_whale_oi_floor {
            return Err(ThresholdError::Inverted {
                market: "perp",
                mid: perp_mid_oi_floor,
                whale: perp_whale_oi_floor,
            });
        }

        Ok(Self {
            spot_whale_floor,
            spot_mid_floor,
            perp_whale_oi_floor,
            perp_mid_oi_floor,
        })
    }

    /// Read overrides from `SPOT_WHALE_FLOOR`, `SPOT_MID_FLOOR`, `PERP_WHALE_OI_FLOOR`
    /// and `PERP_MID_OI_FLOOR`, defaulting any unset variable.
    pub fn from_env() -> Result<Self, ThresholdError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`ThresholdConfig::from_env`], but falls back to [`Default`] on invalid input.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|error| {
            warn!(%error, "invalid threshold overrides, using defaults");
            Self::default()
        })
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ThresholdError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let read = |var: &'static str, default: f64| -> Result<f64, ThresholdError> {
            match lookup(var) {
                Some(value) => value.trim().parse::<f64>().map_err(|_| ThresholdError::Parse {
                    var,
                    value: value.clone(),
                }),
                None => Ok(default),
            }
        };

        let config = Self::new(
            read("SPOT_WHALE_FLOOR", DEFAULT_SPOT_WHALE_FLOOR)?,
            read("SPOT_MID_FLOOR", DEFAULT_SPOT_MID_FLOOR)?,
            read("PERP_WHALE_OI_FLOOR", DEFAULT_PERP_WHALE_OI_FLOOR)?,
            read("PERP_MID_OI_FLOOR", DEFAULT_PERP_MID_OI_FLOOR)?,
        )?;

        debug!(?config, "loaded cluster thresholds");
        Ok(config)
    }

    pub fn spot_whale_floor(&self) -> f64 {
        self.spot_whale_floor
    }

    pub fn spot_mid_floor(&self) -> f64 {
        self.spot_mid_floor
    }

    pub fn perp_whale_oi_floor(&self) -> f64 {
        self.perp_whale_oi_floor
    }

    pub fn perp_mid_oi_floor(&self) -> f64 {
        self.perp_mid_oi_floor
    }
}
