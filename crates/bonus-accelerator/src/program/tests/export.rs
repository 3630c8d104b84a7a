use super::common::*;
use crate::program::export::{file_name, render, to_csv_summary, to_json};
use crate::program::{evaluate_at, DealRecord, ExportFormat};

fn record() -> DealRecord {
    let deal = deal();
    let result = evaluate_at(&deal, &program(), computed_at()).expect("evaluates");
    DealRecord { deal, result }
}

#[test]
fn csv_summary_has_header_and_single_row() {
    let csv = to_csv_summary(&record()).expect("csv renders");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "SFDC_PO_ID,Product,Region,Role,Currency,Eligible,Tier,Multiplier,BaseBonusUSD,GrossBonusUSD,SigningDate,LaunchDate"
    );
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("006xx00000ABC123,NovaEdge,NA,AE,USD,true,Tier 2,1.5,"));
    assert!(lines[1].ends_with(",2025-09-15,2025-08-01"));
}

#[test]
fn csv_summary_leaves_tier_blank_for_ineligible_deals() {
    let mut record = record();
    record.deal.is_new_customer = false;
    record.result = evaluate_at(&record.deal, &program(), computed_at()).expect("evaluates");

    let csv = to_csv_summary(&record).expect("csv renders");

    assert!(csv.lines().nth(1).expect("row").contains(",false,,0.0,"));
}

#[test]
fn json_record_flattens_deal_and_result() {
    let json = to_json(&record()).expect("json renders");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["product"], "NovaEdge");
    assert_eq!(value["launch_or_announce_date"], "2025-08-01");
    assert_eq!(value["tier"], "Tier 2");
    assert_eq!(value["fx"], 1.0);
    assert_eq!(value["payouts"][1]["date"], "2026-03-31");
    assert_eq!(value["payouts"][1]["usd"], 3750.0);
    assert_eq!(value["payouts"][1]["local"], 3750.0);
    assert_eq!(value["checklist"]["po_submitted"], true);
    assert_eq!(value["audit"]["config_version"], "session");
    assert_eq!(value["audit"]["tier_rule"]["name"], "Tier 2");
}

#[test]
fn render_dispatches_on_format() {
    let record = record();

    assert!(render(&record, ExportFormat::Csv)
        .expect("csv")
        .starts_with("SFDC_PO_ID"));
    assert!(render(&record, ExportFormat::Json)
        .expect("json")
        .starts_with('{'));
}

#[test]
fn file_names_fall_back_and_are_header_safe() {
    let mut record = record();
    assert_eq!(
        file_name(&record, ExportFormat::Json),
        "bonus_006xx00000ABC123.json"
    );

    record.deal.external_ref = "  ".to_string();
    assert_eq!(file_name(&record, ExportFormat::Csv), "bonus_deal.csv");

    record.deal.external_ref = "PO 12/\"3\"".to_string();
    assert_eq!(file_name(&record, ExportFormat::Csv), "bonus_PO_12__3_.csv");
}
