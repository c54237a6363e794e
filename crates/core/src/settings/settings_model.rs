//! Settings domain models.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::interest::validate_annual_rate;
use crate::reconciliation::PeriodMatchPolicy;
use crate::Result;

pub const SETTING_DEFAULT_INTEREST_RATE: &str = "default_interest_rate";
pub const SETTING_DEFAULT_ACTOR: &str = "default_actor";
pub const SETTING_PERIOD_MATCH_POLICY: &str = "period_match_policy";

/// Engine settings persisted as key/value pairs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Annual rate in percent used when a recompute does not name one
    pub default_interest_rate: Decimal,
    /// Actor recorded on audit entries when the caller does not name one
    pub default_actor: String,
    pub period_match_policy: PeriodMatchPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_interest_rate: dec!(18),
            default_actor: "system".to_string(),
            period_match_policy: PeriodMatchPolicy::Exact,
        }
    }
}

impl Settings {
    /// Builds settings from stored pairs. Unknown keys are ignored and
    /// unparsable values keep their defaults.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Settings::default();
        for (key, value) in pairs {
            match key.as_str() {
                SETTING_DEFAULT_INTEREST_RATE => match Decimal::from_str(value.trim()) {
                    Ok(rate) if rate > Decimal::ZERO => settings.default_interest_rate = rate,
                    _ => warn!("Ignoring invalid {} value '{}'", key, value),
                },
                SETTING_DEFAULT_ACTOR => {
                    if !value.trim().is_empty() {
                        settings.default_actor = value;
                    }
                }
                SETTING_PERIOD_MATCH_POLICY => match PeriodMatchPolicy::parse(&value) {
                    Some(policy) => settings.period_match_policy = policy,
                    None => warn!("Ignoring invalid {} value '{}'", key, value),
                },
                _ => {}
            }
        }
        settings
    }
}

/// Partial settings update; `None` leaves a value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub default_interest_rate: Option<Decimal>,
    pub default_actor: Option<String>,
    pub period_match_policy: Option<PeriodMatchPolicy>,
}

impl SettingsUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(rate) = self.default_interest_rate {
            validate_annual_rate(rate)?;
        }
        Ok(())
    }

    /// Key/value pairs to persist.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(rate) = self.default_interest_rate {
            pairs.push((SETTING_DEFAULT_INTEREST_RATE, rate.normalize().to_string()));
        }
        if let Some(actor) = &self.default_actor {
            pairs.push((SETTING_DEFAULT_ACTOR, actor.trim().to_string()));
        }
        if let Some(policy) = self.period_match_policy {
            pairs.push((SETTING_PERIOD_MATCH_POLICY, policy.as_str().to_string()));
        }
        pairs
    }
}
