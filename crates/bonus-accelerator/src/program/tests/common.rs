use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::program::history::BoundedResultLog;
use crate::program::{
    default_program, DealEvaluationService, DealInput, DealSubmission, PayoutStep, ProgramConfig,
    TierRule,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn program() -> ProgramConfig {
    default_program()
}

pub(super) fn computed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// New-customer push deal in NA for an AE, signed mid-September 2025.
pub(super) fn deal() -> DealInput {
    DealInput {
        product: "NovaEdge".to_string(),
        region: "NA".to_string(),
        role: "AE".to_string(),
        currency: "USD".to_string(),
        annual_order_value: 300_000.0,
        contract_term_months: 18,
        signing_date: date(2025, 9, 15),
        launch_date: date(2025, 8, 1),
        is_new_customer: true,
        product_type_push: true,
        external_ref: "006xx00000ABC123".to_string(),
    }
}

pub(super) fn submission() -> DealSubmission {
    DealSubmission {
        product: "NovaEdge".to_string(),
        region: "NA".to_string(),
        role: "AE".to_string(),
        currency: "USD".to_string(),
        annual_order_value: 300_000.0,
        contract_term_months: 18,
        signing_date: date(2025, 9, 15),
        launch_date: date(2025, 8, 1),
        is_new_customer: true,
        product_type_push: None,
        external_ref: "006xx00000ABC123".to_string(),
    }
}

pub(super) fn tier(
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

pub(super) fn service_with_capacity(
    capacity: usize,
) -> (
    Arc<DealEvaluationService<BoundedResultLog>>,
    Arc<BoundedResultLog>,
) {
    let log = Arc::new(BoundedResultLog::with_capacity(capacity));
    let service = Arc::new(DealEvaluationService::new(program(), log.clone()));
    (service, log)
}
