use super::super::domain::TierRule;
use super::super::validation::ConfigurationError;

/// First tier whose range holds `order_value_usd`, in configured order.
/// Values no range covers fall back to the tier with the lowest floor, so a
/// tier is always available for the audit trail.
pub(crate) fn select_tier(
    order_value_usd: f64,
    tiers: &[TierRule],
) -> Result<&TierRule, ConfigurationError> {
    if let Some(tier) = tiers.iter().find(|tier| tier.contains(order_value_usd)) {
        return Ok(tier);
    }

    tiers
        .iter()
        .reduce(|lowest, tier| {
            if tier.min_value < lowest.min_value {
                tier
            } else {
                lowest
            }
        })
        .ok_or(ConfigurationError::EmptyTiers)
}
