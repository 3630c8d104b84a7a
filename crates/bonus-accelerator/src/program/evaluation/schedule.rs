use chrono::NaiveDate;

use super::super::calendar::{add_average_months, end_of_month, round_cents};
use super::super::domain::TierRule;
use super::super::validation::ConfigurationError;

/// USD leg of one scheduled payout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScheduledAmount {
    pub date: NaiveDate,
    pub amount_usd: f64,
}

/// Expands the tier's payout plan into month-end dated amounts, keeping the
/// configured order.
pub(crate) fn build_schedule(
    tier: &TierRule,
    signing_date: NaiveDate,
    gross_bonus_usd: f64,
) -> Result<Vec<ScheduledAmount>, ConfigurationError> {
    tier.payouts
        .iter()
        .map(|step| -> Result<ScheduledAmount, ConfigurationError> {
            let date = add_average_months(signing_date, step.month_offset)
                .and_then(end_of_month)
                .ok_or_else(|| ConfigurationError::DateOutOfRange {
                    context: format!(
                        "payout {} months after {signing_date} for tier '{}'",
                        step.month_offset, tier.name
                    ),
                })?;

            Ok(ScheduledAmount {
                date,
                amount_usd: round_cents(gross_bonus_usd * step.fraction),
            })
        })
        .collect()
}
