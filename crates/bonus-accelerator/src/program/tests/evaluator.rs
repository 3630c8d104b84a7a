use super::common::*;
use crate::program::evaluation::CONFIG_VERSION;
use crate::program::{evaluate, evaluate_at, ConfigurationError, DEFAULT_PROGRAM_NAME};

#[test]
fn eligible_deal_earns_tier_bonus_and_schedule() {
    let result = evaluate_at(&deal(), &program(), computed_at()).expect("evaluates");

    assert!(result.eligible);
    assert!(result.reasons.is_empty());
    assert_eq!(result.tier.as_deref(), Some("Tier 2"));
    assert_eq!(result.multiplier, 1.5);
    assert_eq!(result.base_bonus_usd, 5_000.0);
    assert_eq!(result.gross_bonus_usd, 7_500.0);
    assert_eq!(result.fx_rate, 1.0);
    assert_eq!(result.currency, "USD");
    assert_eq!(result.payouts.len(), 2);
    assert_eq!(result.payouts[0].date, date(2025, 9, 30));
    assert_eq!(result.payouts[1].date, date(2026, 3, 31));
    assert_eq!(result.total_usd(), 7_500.0);
    assert_eq!(result.total_local(), 7_500.0);
}

#[test]
fn ineligible_deal_keeps_tier_in_audit_only() {
    let mut deal = deal();
    deal.is_new_customer = false;

    let result = evaluate_at(&deal, &program(), computed_at()).expect("evaluates");

    assert!(!result.eligible);
    assert_eq!(result.tier, None);
    assert_eq!(result.multiplier, 0.0);
    assert_eq!(result.gross_bonus_usd, 0.0);
    assert_eq!(result.base_bonus_usd, 5_000.0);
    assert!(result.payouts.is_empty());
    assert_eq!(result.audit.tier_rule.name, "Tier 2");
}

#[test]
fn unmapped_region_role_earns_zero_without_warning() {
    let mut deal = deal();
    deal.region = "LATAM".to_string();

    let result = evaluate_at(&deal, &program(), computed_at()).expect("evaluates");

    assert!(result.eligible);
    assert!(result.reasons.is_empty());
    assert_eq!(result.base_bonus_usd, 0.0);
    assert_eq!(result.gross_bonus_usd, 0.0);
    assert!(result.payouts.iter().all(|payout| payout.amount_usd == 0.0));
}

#[test]
fn checklist_derives_only_the_po_flag() {
    let program = program();
    let with_ref = evaluate_at(&deal(), &program, computed_at()).expect("evaluates");

    let mut blank = deal();
    blank.external_ref = "   ".to_string();
    let without_ref = evaluate_at(&blank, &program, computed_at()).expect("evaluates");

    assert!(with_ref.checklist.po_submitted);
    assert!(!without_ref.checklist.po_submitted);
    for checklist in [with_ref.checklist, without_ref.checklist] {
        assert!(!checklist.sales_ops_validated);
        assert!(!checklist.product_mgmt_validated);
        assert!(!checklist.bonus_confirmed_within_sla);
        assert_eq!(checklist.confirm_sla_days, 30);
        assert!(!checklist.is_complete());
    }
}

#[test]
fn audit_snapshots_program_input_and_tier() {
    let deal = deal();

    let result = evaluate_at(&deal, &program(), computed_at()).expect("evaluates");

    assert_eq!(result.audit.program, DEFAULT_PROGRAM_NAME);
    assert_eq!(result.audit.computed_at, "2025-09-15T12:00:00.000000Z");
    assert_eq!(result.audit.input, deal);
    assert_eq!(result.audit.config_version, CONFIG_VERSION);
    assert_eq!(result.audit.tier_rule, program().tiers[1]);
}

#[test]
fn audit_keeps_raw_input_for_normalized_values() {
    let mut deal = deal();
    deal.annual_order_value = -10.0;

    let result = evaluate_at(&deal, &program(), computed_at()).expect("evaluates");

    assert_eq!(result.audit.input.annual_order_value, -10.0);
    assert_eq!(result.audit.tier_rule.name, "Tier 1");
}

#[test]
fn live_timestamp_is_utc_with_z_suffix() {
    let result = evaluate(&deal(), &program()).expect("evaluates");

    assert!(result.audit.computed_at.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&result.audit.computed_at).is_ok());
}

#[test]
fn repeated_evaluation_is_identical_apart_from_timestamp() {
    let program = program();
    let deal = deal();

    let first = evaluate(&deal, &program).expect("evaluates");
    let mut second = evaluate(&deal, &program).expect("evaluates");
    second.audit.computed_at = first.audit.computed_at.clone();

    assert_eq!(first, second);
}

#[test]
fn empty_tiers_fail_before_any_work() {
    let mut program = program();
    program.tiers.clear();

    let err = evaluate_at(&deal(), &program, computed_at()).expect_err("rejected");

    assert_eq!(err, ConfigurationError::EmptyTiers);
}
