use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::defaults::DEFAULT_PROGRAM_NAME;

/// Immutable snapshot of the program parameters a deal is evaluated against.
///
/// Editing a program means building a new snapshot; the engine only ever
/// borrows one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramConfig {
    #[serde(default = "default_program_name")]
    pub program_name: String,
    pub program_months: u32,
    pub min_order_usd: f64,
    pub min_term_months: u32,
    pub confirm_sla_days: u32,
    pub base_bonus_by_region_role: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub push_products: BTreeSet<String>,
    /// Units of local currency per 1 USD, keyed by quarter label then currency code.
    #[serde(default)]
    pub fx_by_quarter: BTreeMap<String, BTreeMap<String, f64>>,
    pub tiers: Vec<TierRule>,
}

fn default_program_name() -> String {
    DEFAULT_PROGRAM_NAME.to_string()
}

impl ProgramConfig {
    pub fn is_push_product(&self, product: &str) -> bool {
        self.push_products.contains(product.trim())
    }

    /// Regions in table order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.base_bonus_by_region_role.keys().map(String::as_str)
    }

    /// Every role mapped under any region, deduplicated and sorted.
    pub fn roles(&self) -> BTreeSet<&str> {
        self.base_bonus_by_region_role
            .values()
            .flat_map(|roles| roles.keys().map(String::as_str))
            .collect()
    }
}

/// Order-value bracket with its multiplier and payout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRule {
    pub name: String,
    pub min_value: f64,
    /// Open-ended when absent.
    #[serde(default)]
    pub max_value: Option<f64>,
    pub multiplier: f64,
    pub payouts: Vec<PayoutStep>,
}

impl TierRule {
    pub fn contains(&self, order_value_usd: f64) -> bool {
        order_value_usd >= self.min_value
            && self
                .max_value
                .map_or(true, |max_value| order_value_usd <= max_value)
    }
}

/// Share of the gross bonus paid `month_offset` average months after signing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutStep {
    pub month_offset: u32,
    pub fraction: f64,
}

/// One transaction submitted for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInput {
    pub product: String,
    pub region: String,
    pub role: String,
    pub currency: String,
    pub annual_order_value: f64,
    pub contract_term_months: i32,
    pub signing_date: NaiveDate,
    #[serde(alias = "launch_or_announce_date")]
    pub launch_date: NaiveDate,
    pub is_new_customer: bool,
    pub product_type_push: bool,
    /// CRM purchase order / opportunity reference; free text.
    #[serde(default)]
    pub external_ref: String,
}

impl DealInput {
    /// Currency code trimmed and upper-cased.
    pub fn normalized_currency(&self) -> String {
        self.currency.trim().to_ascii_uppercase()
    }

    /// Order value used for tier selection; negative or non-finite values
    /// count as zero. Eligibility compares the raw value.
    pub fn effective_order_value(&self) -> f64 {
        if self.annual_order_value.is_finite() {
            self.annual_order_value.max(0.0)
        } else {
            0.0
        }
    }

    /// True when the raw order value reaches `minimum`; NaN and infinities never do.
    pub fn meets_order_minimum(&self, minimum: f64) -> bool {
        self.annual_order_value.is_finite() && self.annual_order_value >= minimum
    }

    pub fn meets_term_minimum(&self, minimum_months: u32) -> bool {
        i64::from(self.contract_term_months) >= i64::from(minimum_months)
    }

    pub fn has_external_ref(&self) -> bool {
        !self.external_ref.trim().is_empty()
    }
}

/// One scheduled disbursement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub date: NaiveDate,
    pub amount_usd: f64,
    pub amount_local: f64,
}

/// Compliance confirmations attached to a result. Only `po_submitted` is
/// derived; the rest start unchecked and belong to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceChecklist {
    pub po_submitted: bool,
    pub sales_ops_validated: bool,
    pub product_mgmt_validated: bool,
    pub bonus_confirmed_within_sla: bool,
    pub confirm_sla_days: u32,
}

impl ComplianceChecklist {
    pub fn is_complete(&self) -> bool {
        self.po_submitted
            && self.sales_ops_validated
            && self.product_mgmt_validated
            && self.bonus_confirmed_within_sla
    }
}

/// Traceable record of how a result was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub program: String,
    /// ISO-8601 UTC with a `Z` suffix.
    pub computed_at: String,
    pub input: DealInput,
    pub config_version: String,
    pub tier_rule: TierRule,
}

/// Evaluation output for a single deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealResult {
    pub eligible: bool,
    pub reasons: Vec<String>,
    pub tier: Option<String>,
    pub multiplier: f64,
    pub base_bonus_usd: f64,
    pub gross_bonus_usd: f64,
    pub fx_rate: f64,
    pub currency: String,
    pub payouts: Vec<Payout>,
    pub checklist: ComplianceChecklist,
    pub audit: AuditRecord,
}

impl DealResult {
    pub fn total_usd(&self) -> f64 {
        self.payouts.iter().map(|payout| payout.amount_usd).sum()
    }

    pub fn total_local(&self) -> f64 {
        self.payouts.iter().map(|payout| payout.amount_local).sum()
    }
}
