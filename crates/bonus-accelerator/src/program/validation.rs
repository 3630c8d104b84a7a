use super::domain::ProgramConfig;

/// Program snapshot problems that make a deal impossible to evaluate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("program defines no tiers")]
    EmptyTiers,
    #[error("tier '{tier}' has negative payout fraction {fraction} at month offset {month_offset}")]
    NegativePayoutFraction {
        tier: String,
        month_offset: u32,
        fraction: f64,
    },
    #[error("FX rate for {currency} in {quarter} must be positive, got {rate}")]
    NonPositiveFxRate {
        quarter: String,
        currency: String,
        rate: f64,
    },
    #[error("program_months must be greater than zero")]
    NonPositiveProgramMonths,
    #[error("min_order_usd must be zero or greater, got {0}")]
    NegativeMinimumOrder(f64),
    #[error("base bonus for {region}/{role} must be zero or greater, got {amount}")]
    NegativeBaseBonus {
        region: String,
        role: String,
        amount: f64,
    },
    #[error("{context} falls outside the supported calendar range")]
    DateOutOfRange { context: String },
    #[error("FX rate for {currency} in {quarter} is listed more than once")]
    DuplicateFxRate { quarter: String, currency: String },
}

impl ProgramConfig {
    /// Checks every constraint a program snapshot must satisfy before it is
    /// accepted by the loader or swapped into a running service.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.program_months == 0 {
            return Err(ConfigurationError::NonPositiveProgramMonths);
        }
        if self.min_order_usd.is_nan() || self.min_order_usd < 0.0 {
            return Err(ConfigurationError::NegativeMinimumOrder(self.min_order_usd));
        }
        for (region, roles) in &self.base_bonus_by_region_role {
            for (role, amount) in roles {
                if amount.is_nan() || *amount < 0.0 {
                    return Err(ConfigurationError::NegativeBaseBonus {
                        region: region.clone(),
                        role: role.clone(),
                        amount: *amount,
                    });
                }
            }
        }
        for (quarter, rates) in &self.fx_by_quarter {
            for (currency, rate) in rates {
                check_fx_rate(quarter, currency, *rate)?;
            }
        }
        self.check_evaluable()
    }

    /// The subset of [`validate`](Self::validate) an evaluation cannot proceed without.
    pub(crate) fn check_evaluable(&self) -> Result<(), ConfigurationError> {
        if self.tiers.is_empty() {
            return Err(ConfigurationError::EmptyTiers);
        }
        for tier in &self.tiers {
            if let Some(step) = tier
                .payouts
                .iter()
                .find(|step| !step.fraction.is_finite() || step.fraction < 0.0)
            {
                return Err(ConfigurationError::NegativePayoutFraction {
                    tier: tier.name.clone(),
                    month_offset: step.month_offset,
                    fraction: step.fraction,
                });
            }
        }
        Ok(())
    }
}

pub(crate) fn check_fx_rate(
    quarter: &str,
    currency: &str,
    rate: f64,
) -> Result<f64, ConfigurationError> {
    if rate > 0.0 && rate.is_finite() {
        Ok(rate)
    } else {
        Err(ConfigurationError::NonPositiveFxRate {
            quarter: quarter.to_string(),
            currency: currency.to_string(),
            rate,
        })
    }
}
