//! Consumption profile: quit date, per-day habits and prices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Fixed key the profile is stored under.
pub const PROFILE_STORAGE_KEY: &str = "com.nicoboo.userProfile";

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmokingType {
    Smoke,
    Vape,
    Both,
}

impl SmokingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmokingType::Smoke => "smoke",
            SmokingType::Vape => "vape",
            SmokingType::Both => "both",
        }
    }
}

impl fmt::Display for SmokingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmokingType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smoke" => Ok(SmokingType::Smoke),
            "vape" => Ok(SmokingType::Vape),
            "both" => Ok(SmokingType::Both),
            other => Err(ValidationError::UnknownTag {
                kind: "smoking type",
                value: other.to_string(),
            }),
        }
    }
}

/// Per-modality consumption rates used by the accrual calculator.
///
/// All fields are optional; a missing field zeroes the contribution that
/// depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModalityRates {
    pub per_day: Option<f64>,
    pub per_pack: Option<f64>,
    pub price_per_pack: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub smoking_type: SmokingType,
    pub stop_date: DateTime<Utc>,

    #[serde(default)]
    pub cigarettes_per_day: Option<u32>,
    #[serde(default)]
    pub cigarettes_per_pack: Option<u32>,
    #[serde(default)]
    pub price_per_pack: Option<f64>,

    #[serde(default)]
    pub puffs_per_day: Option<u32>,
    #[serde(default)]
    pub pods_per_day: Option<u32>,
    /// Legacy field, still read from older stored profiles.
    #[serde(default)]
    pub milliliters_per_pod: Option<f64>,
    #[serde(default)]
    pub price_per_pod: Option<f64>,

    #[serde(default = "default_currency")]
    pub currency_code: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Profile {
    pub fn new(smoking_type: SmokingType, stop_date: DateTime<Utc>) -> Self {
        Self {
            smoking_type,
            stop_date,
            cigarettes_per_day: None,
            cigarettes_per_pack: None,
            price_per_pack: None,
            puffs_per_day: None,
            pods_per_day: None,
            milliliters_per_pod: None,
            price_per_pod: None,
            currency_code: default_currency(),
        }
    }

    /// Cigarette rates; a pack holds `cigarettes_per_pack` units.
    pub fn cigarette_rates(&self) -> ModalityRates {
        ModalityRates {
            per_day: self.cigarettes_per_day.map(f64::from),
            per_pack: self.cigarettes_per_pack.map(f64::from),
            price_per_pack: self.price_per_pack,
        }
    }

    /// Pod rates; the "pack" is a single pod.
    pub fn pod_rates(&self) -> ModalityRates {
        ModalityRates {
            per_day: self.pods_per_day.map(f64::from),
            per_pack: Some(1.0),
            price_per_pack: self.price_per_pod,
        }
    }

    /// Rates for every modality the smoking type makes active.
    pub fn active_rates(&self) -> Vec<ModalityRates> {
        match self.smoking_type {
            SmokingType::Smoke => vec![self.cigarette_rates()],
            SmokingType::Vape => vec![self.pod_rates()],
            SmokingType::Both => vec![self.cigarette_rates(), self.pod_rates()],
        }
    }

    /// Check the numeric invariants: every present price is finite and non-negative,
    /// and the currency code is not blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let prices = [
            ("price_per_pack", self.price_per_pack),
            ("milliliters_per_pod", self.milliliters_per_pod),
            ("price_per_pod", self.price_per_pod),
        ];
        for (field, value) in prices {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ValidationError::InvalidValue {
                        field: field.to_string(),
                        message: "must be a finite number".into(),
                    });
                }
                if v < 0.0 {
                    return Err(ValidationError::InvalidValue {
                        field: field.to_string(),
                        message: format!("must not be negative (got {v})"),
                    });
                }
            }
        }
        if self.currency_code.trim().is_empty() {
            return Err(ValidationError::Empty("currency_code".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stop() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn deserializes_legacy_camel_case_json() {
        let json = r#"{
            "smokingType": "both",
            "stopDate": "2025-11-01T08:00:00Z",
            "cigarettesPerDay": 15,
            "cigarettesPerPack": 20,
            "pricePerPack": 9.5,
            "puffsPerDay": 200,
            "podsPerDay": 1,
            "millilitersPerPod": 0.7,
            "pricePerPod": 4.0,
            "currencyCode": "EUR"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.smoking_type, SmokingType::Both);
        assert_eq!(profile.stop_date, stop());
        assert_eq!(profile.cigarettes_per_day, Some(15));
        assert_eq!(profile.currency_code, "EUR");
        assert_eq!(profile.active_rates().len(), 2);
    }

    #[test]
    fn missing_currency_defaults_to_usd() {
        let json = r#"{"smokingType": "smoke", "stopDate": "2025-11-01T08:00:00Z"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.currency_code, "USD");
        assert!(profile.cigarettes_per_day.is_none());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut profile = Profile::new(SmokingType::Smoke, stop());
        profile.price_per_pack = Some(-1.0);
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("price_per_pack"));
    }

    #[test]
    fn nan_price_is_rejected() {
        let mut profile = Profile::new(SmokingType::Vape, stop());
        profile.price_per_pod = Some(f64::NAN);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn vape_rates_use_single_pod_packs() {
        let mut profile = Profile::new(SmokingType::Vape, stop());
        profile.pods_per_day = Some(2);
        profile.price_per_pod = Some(3.0);
        let rates = profile.active_rates();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].per_day, Some(2.0));
        assert_eq!(rates[0].per_pack, Some(1.0));
        assert_eq!(rates[0].price_per_pack, Some(3.0));
    }

    #[test]
    fn smoking_type_parses_case_insensitively() {
        assert_eq!("VAPE".parse::<SmokingType>().unwrap(), SmokingType::Vape);
        assert!("cigar".parse::<SmokingType>().is_err());
    }
}
