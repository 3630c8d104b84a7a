//! File renderings of an evaluated deal: a full JSON record and a one-row CSV
//! summary. The engine itself never serializes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AuditRecord, ComplianceChecklist};
use super::history::DealRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV export: {0}")]
    CsvFlush(String),
    #[error("CSV export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn render(record: &DealRecord, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => to_json(record),
        ExportFormat::Csv => to_csv_summary(record),
    }
}

/// Download name, `bonus_<reference>.<ext>`, falling back to `bonus_deal`.
/// Characters outside `[A-Za-z0-9_-]` are replaced so the name is safe in a
/// `Content-Disposition` header.
pub fn file_name(record: &DealRecord, format: ExportFormat) -> String {
    let reference = record.deal.external_ref.trim();
    let stem = if reference.is_empty() {
        "deal".to_string()
    } else {
        reference
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect()
    };
    format!("bonus_{stem}.{}", format.extension())
}

pub fn to_json(record: &DealRecord) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&JsonRecord::from(record))?)
}

pub fn to_csv_summary(record: &DealRecord) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(SummaryRow::from(record))?;
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::CsvFlush(err.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    product: &'a str,
    region: &'a str,
    role: &'a str,
    currency: &'a str,
    annual_order_value: f64,
    contract_term_months: i32,
    signing_date: NaiveDate,
    launch_or_announce_date: NaiveDate,
    is_new_customer: bool,
    product_type_push: bool,
    external_ref: &'a str,
    eligible: bool,
    tier: Option<&'a str>,
    multiplier: f64,
    base_bonus_usd: f64,
    gross_bonus_usd: f64,
    fx: f64,
    payouts: Vec<JsonPayout>,
    checklist: &'a ComplianceChecklist,
    audit: &'a AuditRecord,
}

#[derive(Debug, Serialize)]
struct JsonPayout {
    date: NaiveDate,
    usd: f64,
    local: f64,
}

impl<'a> From<&'a DealRecord> for JsonRecord<'a> {
    fn from(record: &'a DealRecord) -> Self {
        let DealRecord { deal, result } = record;
        Self {
            product: &deal.product,
            region: &deal.region,
            role: &deal.role,
            currency: &result.currency,
            annual_order_value: deal.annual_order_value,
            contract_term_months: deal.contract_term_months,
            signing_date: deal.signing_date,
            launch_or_announce_date: deal.launch_date,
            is_new_customer: deal.is_new_customer,
            product_type_push: deal.product_type_push,
            external_ref: &deal.external_ref,
            eligible: result.eligible,
            tier: result.tier.as_deref(),
            multiplier: result.multiplier,
            base_bonus_usd: result.base_bonus_usd,
            gross_bonus_usd: result.gross_bonus_usd,
            fx: result.fx_rate,
            payouts: result
                .payouts
                .iter()
                .map(|payout| JsonPayout {
                    date: payout.date,
                    usd: payout.amount_usd,
                    local: payout.amount_local,
                })
                .collect(),
            checklist: &result.checklist,
            audit: &result.audit,
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "SFDC_PO_ID")]
    external_ref: &'a str,
    #[serde(rename = "Product")]
    product: &'a str,
    #[serde(rename = "Region")]
    region: &'a str,
    #[serde(rename = "Role")]
    role: &'a str,
    #[serde(rename = "Currency")]
    currency: &'a str,
    #[serde(rename = "Eligible")]
    eligible: bool,
    #[serde(rename = "Tier")]
    tier: Option<&'a str>,
    #[serde(rename = "Multiplier")]
    multiplier: f64,
    #[serde(rename = "BaseBonusUSD")]
    base_bonus_usd: f64,
    #[serde(rename = "GrossBonusUSD")]
    gross_bonus_usd: f64,
    #[serde(rename = "SigningDate")]
    signing_date: NaiveDate,
    #[serde(rename = "LaunchDate")]
    launch_date: NaiveDate,
}

impl<'a> From<&'a DealRecord> for SummaryRow<'a> {
    fn from(record: &'a DealRecord) -> Self {
        let DealRecord { deal, result } = record;
        Self {
            external_ref: &deal.external_ref,
            product: &deal.product,
            region: &deal.region,
            role: &deal.role,
            currency: &result.currency,
            eligible: result.eligible,
            tier: result.tier.as_deref(),
            multiplier: result.multiplier,
            base_bonus_usd: result.base_bonus_usd,
            gross_bonus_usd: result.gross_bonus_usd,
            signing_date: deal.signing_date,
            launch_date: deal.launch_date,
        }
    }
}
