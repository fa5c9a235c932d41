//! NAI-tagged exact monetary amounts.
//!
//! An [`Asset`] is the `{nai, precision, amount}` triple used by Hive-style
//! chains. The magnitude is kept as the exact decimal string it arrived as
//! and is only ever interpreted through `i128` — binary floating point never
//! touches it. `{"nai": "@@000000021", "precision": 3, "amount": "10"}`
//! means 0.010 HIVE, and the `"10"` survives a round trip byte for byte.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    HBD_NAI, HIVE_NAI, HIVE_PRECISION, MAX_ASSET_PRECISION, VESTS_NAI, VESTS_PRECISION,
};
use crate::error::ProtocolError;

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// An exact amount of one chain asset.
///
/// Invariants, enforced at construction and deserialization:
/// - `precision <= MAX_ASSET_PRECISION`
/// - `amount` parses as a (possibly negative) `i128` with no fractional part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Numeric asset identifier, e.g. `@@000000021` for HIVE.
    pub nai: String,
    /// Number of decimal places the magnitude is scaled by.
    pub precision: u8,
    /// Magnitude in the smallest unit, as an exact decimal string.
    pub amount: String,
}

impl Asset {
    /// Builds an asset after validating the triple.
    pub fn new(
        nai: impl Into<String>,
        precision: u8,
        amount: impl Into<String>,
    ) -> Result<Self, ProtocolError> {
        let nai = nai.into();
        let amount = amount.into();

        if precision > MAX_ASSET_PRECISION {
            return Err(ProtocolError::InvalidAsset {
                reason: format!(
                    "precision {precision} exceeds maximum {MAX_ASSET_PRECISION}"
                ),
            });
        }
        if amount.parse::<i128>().is_err() {
            return Err(ProtocolError::InvalidAsset {
                reason: format!("amount {amount:?} is not an exact integer string"),
            });
        }

        Ok(Self {
            nai,
            precision,
            amount,
        })
    }

    /// HIVE from an integer count of its smallest unit (0.001 HIVE).
    pub fn hive(satoshis: i64) -> Self {
        Self {
            nai: HIVE_NAI.to_string(),
            precision: HIVE_PRECISION,
            amount: satoshis.to_string(),
        }
    }

    /// HBD from an integer count of its smallest unit (0.001 HBD).
    pub fn hbd(satoshis: i64) -> Self {
        Self {
            nai: HBD_NAI.to_string(),
            precision: HIVE_PRECISION,
            amount: satoshis.to_string(),
        }
    }

    /// VESTS from an integer count of its smallest unit (0.000001 VESTS).
    pub fn vests(satoshis: i64) -> Self {
        Self {
            nai: VESTS_NAI.to_string(),
            precision: VESTS_PRECISION,
            amount: satoshis.to_string(),
        }
    }

    /// The magnitude as an exact integer.
    pub fn magnitude(&self) -> Result<i128, ProtocolError> {
        self.amount
            .parse::<i128>()
            .map_err(|_| ProtocolError::InvalidAsset {
                reason: format!("amount {:?} is not an exact integer string", self.amount),
            })
    }

    /// `true` when the magnitude is exactly zero.
    pub fn is_zero(&self) -> bool {
        matches!(self.magnitude(), Ok(0))
    }

    /// Ticker symbol for the well-known NAIs, if any.
    pub fn symbol(&self) -> Option<&'static str> {
        match self.nai.as_str() {
            HIVE_NAI => Some("HIVE"),
            HBD_NAI => Some("HBD"),
            VESTS_NAI => Some("VESTS"),
            _ => None,
        }
    }

    /// Human-readable decimal rendering, e.g. `"0.010 HIVE"`.
    ///
    /// Purely for display. The scaling is done with integer division on the
    /// `i128` magnitude, not floating point.
    pub fn display_decimal(&self) -> String {
        let label = self.symbol().map(str::to_string).unwrap_or_else(|| self.nai.clone());
        let Ok(magnitude) = self.magnitude() else {
            return format!("{} {}", self.amount, label);
        };
        let divisor = 10i128.pow(self.precision as u32);
        let whole = magnitude / divisor;
        let frac = (magnitude % divisor).abs();
        let sign = if magnitude < 0 && whole == 0 { "-" } else { "" };
        format!(
            "{}{}.{:0>width$} {}",
            sign,
            whole,
            frac,
            label,
            width = self.precision as usize
        )
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_decimal())
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Accepts the magnitude as either a JSON string (`"10"`, the canonical
/// encoding) or a JSON integer (`10`, produced by some tooling). JSON
/// floats are rejected outright: `10.0` would force the value through
/// binary floating point, which is exactly what this type exists to avoid.
fn magnitude_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => Ok(s),
        Raw::Signed(n) => Ok(n.to_string()),
        Raw::Unsigned(n) => Ok(n.to_string()),
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            nai: String,
            precision: u8,
            #[serde(deserialize_with = "magnitude_string")]
            amount: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        Asset::new(raw.nai, raw.precision, raw.amount).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_use_known_nais() {
        assert_eq!(Asset::hive(1).nai, HIVE_NAI);
        assert_eq!(Asset::hbd(1).nai, HBD_NAI);
        assert_eq!(Asset::vests(1).nai, VESTS_NAI);
        assert_eq!(Asset::hive(1).precision, 3);
        assert_eq!(Asset::vests(1).precision, 6);
    }

    #[test]
    fn magnitude_stays_an_exact_string() {
        let json = r#"{"nai":"@@000000021","precision":3,"amount":"10"}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.amount, "10");
        assert_eq!(asset.magnitude().unwrap(), 10);

        // Round trip preserves the string verbatim.
        let back = serde_json::to_string(&asset).unwrap();
        assert!(back.contains(r#""amount":"10""#));
    }

    #[test]
    fn integer_magnitude_is_accepted() {
        let json = r#"{"nai":"@@000000021","precision":3,"amount":10}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.amount, "10");
    }

    #[test]
    fn float_magnitude_is_rejected() {
        let json = r#"{"nai":"@@000000021","precision":3,"amount":10.0}"#;
        assert!(serde_json::from_str::<Asset>(json).is_err());
    }

    #[test]
    fn fractional_string_is_rejected() {
        assert!(Asset::new(HIVE_NAI, 3, "1.5").is_err());
        assert!(Asset::new(HIVE_NAI, 3, "").is_err());
        assert!(Asset::new(HIVE_NAI, 3, "1e3").is_err());
    }

    #[test]
    fn excessive_precision_is_rejected() {
        let err = Asset::new(HIVE_NAI, 13, "1").unwrap_err();
        assert!(err.to_string().contains("precision"));
    }

    #[test]
    fn negative_magnitudes_parse() {
        let asset = Asset::new(HIVE_NAI, 3, "-42").unwrap();
        assert_eq!(asset.magnitude().unwrap(), -42);
        assert!(!asset.is_zero());
    }

    #[test]
    fn is_zero_detects_zero() {
        assert!(Asset::hive(0).is_zero());
        assert!(!Asset::hive(1).is_zero());
    }

    #[test]
    fn display_decimal_scales_by_precision() {
        assert_eq!(Asset::hive(10).display_decimal(), "0.010 HIVE");
        assert_eq!(Asset::hive(1500).display_decimal(), "1.500 HIVE");
        assert_eq!(Asset::vests(1).display_decimal(), "0.000001 VESTS");
        let negative = Asset::new(HIVE_NAI, 3, "-10").unwrap();
        assert_eq!(negative.display_decimal(), "-0.010 HIVE");
    }

    #[test]
    fn unknown_nai_displays_raw() {
        let asset = Asset::new("@@000000999", 2, "150").unwrap();
        assert_eq!(asset.symbol(), None);
        assert_eq!(asset.display_decimal(), "1.50 @@000000999");
    }

    #[test]
    fn serde_roundtrip() {
        let asset = Asset::hive(1_234);
        let json = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, back);
    }
}
