use chrono::NaiveDate;

use super::super::calendar::QuarterKey;
use super::super::domain::ProgramConfig;
use super::super::validation::{check_fx_rate, ConfigurationError};
use super::REFERENCE_CURRENCY;

/// Rate applied to a deal and whether it was defaulted to parity.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FxResolution {
    pub rate: f64,
    pub used_default: bool,
    pub quarter: QuarterKey,
}

impl FxResolution {
    pub fn missing_rate_warning(&self, currency: &str) -> Option<String> {
        if self.used_default && currency != REFERENCE_CURRENCY {
            Some(format!(
                "No FX rate found for {currency} in {}; using 1.0.",
                self.quarter
            ))
        } else {
            None
        }
    }
}

/// Resolves the USD to `currency` rate for the signing quarter. `currency`
/// is expected to be normalized already.
pub(crate) fn resolve_rate(
    currency: &str,
    signing_date: NaiveDate,
    config: &ProgramConfig,
) -> Result<FxResolution, ConfigurationError> {
    let quarter = QuarterKey::of(signing_date);
    if currency == REFERENCE_CURRENCY {
        return Ok(FxResolution {
            rate: 1.0,
            used_default: false,
            quarter,
        });
    }

    let quarter_label = quarter.to_string();
    let configured = config
        .fx_by_quarter
        .get(&quarter_label)
        .and_then(|rates| rates.get(currency))
        .copied();

    match configured {
        Some(rate) => Ok(FxResolution {
            rate: check_fx_rate(&quarter_label, currency, rate)?,
            used_default: false,
            quarter,
        }),
        None => Ok(FxResolution {
            rate: 1.0,
            used_default: true,
            quarter,
        }),
    }
}
