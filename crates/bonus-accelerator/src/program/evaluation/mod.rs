mod audit;
pub(crate) mod base_bonus;
pub(crate) mod eligibility;
pub(crate) mod fx;
pub(crate) mod schedule;
pub(crate) mod tiers;

pub use audit::CONFIG_VERSION;
pub use eligibility::Disqualification;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::calendar::round_cents;
use super::domain::{ComplianceChecklist, DealInput, DealResult, Payout, ProgramConfig};
use super::validation::ConfigurationError;
use audit::record_audit;
use base_bonus::lookup_base_bonus;
use eligibility::check_eligibility;
use fx::resolve_rate;
use schedule::build_schedule;
use tiers::select_tier;

/// Currency bonuses are denominated in; deals in it convert at parity.
pub const REFERENCE_CURRENCY: &str = "USD";

/// Evaluates one deal against a program snapshot, stamping the audit record
/// with the current time.
pub fn evaluate(deal: &DealInput, config: &ProgramConfig) -> Result<DealResult, ConfigurationError> {
    evaluate_at(deal, config, Utc::now())
}

/// Same as [`evaluate`] with an explicit audit timestamp.
///
/// Deal-level problems never fail the call: they surface as `reasons`. Only a
/// snapshot that cannot produce a meaningful result is rejected.
pub fn evaluate_at(
    deal: &DealInput,
    config: &ProgramConfig,
    computed_at: DateTime<Utc>,
) -> Result<DealResult, ConfigurationError> {
    config.check_evaluable()?;

    let eligibility = check_eligibility(deal, config);
    let eligible = eligibility.eligible();
    let mut reasons: Vec<String> = eligibility
        .reasons
        .iter()
        .map(Disqualification::summary)
        .collect();

    let tier = select_tier(deal.effective_order_value(), &config.tiers)?;
    let base_bonus_usd = lookup_base_bonus(&deal.region, &deal.role, config);
    let multiplier = if eligible { tier.multiplier } else { 0.0 };
    let gross_bonus_usd = round_cents(base_bonus_usd * multiplier);

    let currency = deal.normalized_currency();
    let fx = resolve_rate(&currency, deal.signing_date, config)?;
    if let Some(warning) = fx.missing_rate_warning(&currency) {
        warn!(currency = %currency, quarter = %fx.quarter, "no FX rate configured, using parity");
        reasons.push(warning);
    }

    let payouts = if eligible {
        build_schedule(tier, deal.signing_date, gross_bonus_usd)?
            .into_iter()
            .map(|scheduled| Payout {
                date: scheduled.date,
                amount_usd: scheduled.amount_usd,
                amount_local: round_cents(scheduled.amount_usd * fx.rate),
            })
            .collect()
    } else {
        Vec::new()
    };

    let checklist = ComplianceChecklist {
        po_submitted: deal.has_external_ref(),
        sales_ops_validated: false,
        product_mgmt_validated: false,
        bonus_confirmed_within_sla: false,
        confirm_sla_days: config.confirm_sla_days,
    };

    let audit = record_audit(config, deal, tier, computed_at);

    debug!(
        eligible,
        tier = %tier.name,
        gross_bonus_usd,
        payouts = payouts.len(),
        "deal evaluated"
    );

    Ok(DealResult {
        eligible,
        reasons,
        tier: eligible.then(|| tier.name.clone()),
        multiplier,
        base_bonus_usd,
        gross_bonus_usd,
        fx_rate: fx.rate,
        currency,
        payouts,
        checklist,
        audit,
    })
}
