use std::collections::{BTreeMap, BTreeSet};

use super::domain::{PayoutStep, ProgramConfig, TierRule};

pub const DEFAULT_PROGRAM_NAME: &str = "Global Sales Bonus Accelerator – New Product Launch";

/// Built-in launch program used when no program file is configured.
pub fn default_program() -> ProgramConfig {
    let base_bonus_by_region_role = [
        ("NA", [("AE", 5000.0), ("SE", 5000.0), ("AM", 6000.0)]),
        ("EMEA", [("AE", 4500.0), ("SE", 4500.0), ("AM", 5500.0)]),
        ("APAC", [("AE", 4000.0), ("SE", 4000.0), ("AM", 5000.0)]),
    ]
    .into_iter()
    .map(|(region, roles)| (region.to_string(), amounts(&roles)))
    .collect();

    let fx_by_quarter = [
        (
            "2025Q3",
            [("EUR", 0.92), ("GBP", 0.78), ("JPY", 140.0), ("INR", 83.0)],
        ),
        (
            "2025Q4",
            [("EUR", 0.91), ("GBP", 0.79), ("JPY", 141.0), ("INR", 83.5)],
        ),
    ]
    .into_iter()
    .map(|(quarter, rates)| (quarter.to_string(), amounts(&rates)))
    .collect();

    ProgramConfig {
        program_name: DEFAULT_PROGRAM_NAME.to_string(),
        program_months: 18,
        min_order_usd: 100_000.0,
        min_term_months: 12,
        confirm_sla_days: 30,
        base_bonus_by_region_role,
        push_products: ["NovaEdge", "QuantumSync", "DataPulse"]
            .into_iter()
            .map(str::to_string)
            .collect::<BTreeSet<_>>(),
        fx_by_quarter,
        tiers: vec![
            tier("Tier 1", 100_000.0, Some(249_999.999), 1.0, &[(0, 1.0)]),
            tier(
                "Tier 2",
                250_000.0,
                Some(499_999.999),
                1.5,
                &[(0, 0.5), (6, 0.5)],
            ),
            tier("Tier 3", 500_000.0, None, 2.0, &[(0, 0.5), (12, 0.5)]),
        ],
    }
}

fn amounts(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, amount)| (key.to_string(), *amount))
        .collect()
}

fn tier(
    name: &str,
    min_value: f64,
    max_value: Option<f64>,
    multiplier: f64,
    payouts: &[(u32, f64)],
) -> TierRule {
    TierRule {
        name: name.to_string(),
        min_value,
        max_value,
        multiplier,
        payouts: payouts
            .iter()
            .map(|&(month_offset, fraction)| PayoutStep {
                month_offset,
                fraction,
            })
            .collect(),
    }
}
