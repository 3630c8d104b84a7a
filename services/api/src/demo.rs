use crate::infra::load_program;
use bonus_accelerator::config::AppConfig;
use bonus_accelerator::error::AppError;
use bonus_accelerator::program::calendar::format_whole_dollars;
use bonus_accelerator::program::export::{self, ExportFormat};
use bonus_accelerator::program::{
    evaluate, DealInput, DealRecord, DealSubmission, ProgramConfig, QuarterKey,
};
use chrono::{Duration, Local, NaiveDate};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Product sold on the deal
    #[arg(long)]
    pub(crate) product: String,
    /// Sales region (e.g. NA, EMEA, APAC)
    #[arg(long)]
    pub(crate) region: String,
    /// Seller role (e.g. AE, SE, AM)
    #[arg(long)]
    pub(crate) role: String,
    /// Local currency code for payouts
    #[arg(long, default_value = "USD")]
    pub(crate) currency: String,
    /// Annual order value in USD
    #[arg(long)]
    pub(crate) order_value: f64,
    /// Contract term in months
    #[arg(long)]
    pub(crate) term: i32,
    /// Contract signing date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) signing_date: Option<NaiveDate>,
    /// Product launch/announcement date (YYYY-MM-DD). Defaults to 30 days before today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) launch_date: Option<NaiveDate>,
    /// Mark the customer as an existing customer
    #[arg(long)]
    pub(crate) existing_customer: bool,
    /// Override the push-product flag (defaults to program membership)
    #[arg(long)]
    pub(crate) push: Option<bool>,
    /// CRM purchase order / opportunity reference
    #[arg(long, default_value = "")]
    pub(crate) reference: String,
    /// Program definition (JSON); overrides BONUS_PROGRAM_CONFIG
    #[arg(long)]
    pub(crate) program_config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProgramArgs {
    /// Program definition (JSON); overrides BONUS_PROGRAM_CONFIG
    #[arg(long)]
    pub(crate) program_config: Option<PathBuf>,
    /// Print the full snapshot as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Signing date used for the showcase deals (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) signing_date: Option<NaiveDate>,
    /// Program definition (JSON); overrides BONUS_PROGRAM_CONFIG
    #[arg(long)]
    pub(crate) program_config: Option<PathBuf>,
}

pub(crate) fn run_evaluate(config: &AppConfig, args: EvaluateArgs) -> Result<(), AppError> {
    let program = load_program(args.program_config.as_deref(), config.program.path.as_deref())?;
    let today = Local::now().date_naive();

    let submission = DealSubmission {
        product: args.product,
        region: args.region,
        role: args.role,
        currency: args.currency,
        annual_order_value: args.order_value,
        contract_term_months: args.term,
        signing_date: args.signing_date.unwrap_or(today),
        launch_date: args
            .launch_date
            .unwrap_or_else(|| today - Duration::days(30)),
        is_new_customer: !args.existing_customer,
        product_type_push: args.push,
        external_ref: args.reference,
    };
    let deal = submission.into_deal(&program);
    let result = evaluate(&deal, &program)?;
    let record = DealRecord { deal, result };

    match args.format {
        OutputFormat::Text => render_record(&record),
        OutputFormat::Json => println!("{}", export::render(&record, ExportFormat::Json)?),
        OutputFormat::Csv => print!("{}", export::render(&record, ExportFormat::Csv)?),
    }

    Ok(())
}

pub(crate) fn run_program(config: &AppConfig, args: ProgramArgs) -> Result<(), AppError> {
    let program = load_program(args.program_config.as_deref(), config.program.path.as_deref())?;

    if args.json {
        match serde_json::to_string_pretty(&program) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Program snapshot unavailable: {err}"),
        }
        return Ok(());
    }

    render_program(&program);
    Ok(())
}

pub(crate) fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let program = load_program(args.program_config.as_deref(), config.program.path.as_deref())?;
    let signing_date = args
        .signing_date
        .unwrap_or_else(|| Local::now().date_naive());

    println!("{}", program.program_name);
    for (label, deal) in showcase_deals(&program, signing_date) {
        println!("\n== {label}");
        let result = evaluate(&deal, &program)?;
        render_record(&DealRecord { deal, result });
    }

    Ok(())
}

/// A qualifying deal, the same deal for an existing customer, and a euro
/// deal signed in a quarter the FX table may not cover.
fn showcase_deals(program: &ProgramConfig, signing_date: NaiveDate) -> Vec<(&'static str, DealInput)> {
    let product = program
        .push_products
        .iter()
        .next()
        .cloned()
        .unwrap_or_else(|| "Other".to_string());
    let region = program
        .regions()
        .next()
        .unwrap_or("NA")
        .to_string();
    let role = program
        .roles()
        .into_iter()
        .next()
        .unwrap_or("AE")
        .to_string();

    let qualifying = DealInput {
        product: product.clone(),
        region,
        role,
        currency: "USD".to_string(),
        annual_order_value: 300_000.0,
        contract_term_months: 18,
        signing_date,
        launch_date: signing_date - Duration::days(30),
        is_new_customer: true,
        product_type_push: program.is_push_product(&product),
        external_ref: "DEMO-0001".to_string(),
    };

    let existing_customer = DealInput {
        is_new_customer: false,
        external_ref: String::new(),
        ..qualifying.clone()
    };

    let euro = DealInput {
        currency: "EUR".to_string(),
        external_ref: "DEMO-0003".to_string(),
        ..qualifying.clone()
    };

    vec![
        ("Qualifying new-customer deal", qualifying),
        ("Existing customer", existing_customer),
        ("Euro-denominated deal", euro),
    ]
}

fn render_record(record: &DealRecord) {
    let DealRecord { deal, result } = record;

    println!(
        "{}",
        if result.eligible {
            "Eligible"
        } else {
            "Ineligible"
        }
    );
    if !result.reasons.is_empty() {
        println!("Notes: {}", result.reasons.join(" / "));
    }
    println!(
        "Tier: {} | Multiplier: {:.1}x | Base bonus (USD): ${} | Gross bonus (USD): ${}",
        result.tier.as_deref().unwrap_or("-"),
        result.multiplier,
        format_money(result.base_bonus_usd),
        format_money(result.gross_bonus_usd)
    );
    println!(
        "FX ({} per USD) for {}: {:.4}",
        result.currency,
        QuarterKey::of(deal.signing_date),
        result.fx_rate
    );

    if result.payouts.is_empty() {
        println!("No payouts scheduled.");
    } else {
        println!("Payouts:");
        for payout in &result.payouts {
            println!(
                "  - {} | USD {} | {} {}",
                payout.date,
                format_money(payout.amount_usd),
                result.currency,
                format_money(payout.amount_local)
            );
        }
        println!(
            "Total ({}): {}",
            result.currency,
            format_money(result.total_local())
        );
    }

    let checklist = &result.checklist;
    println!("Validation checklist:");
    println!("  [{}] PO submitted", mark(checklist.po_submitted));
    println!("  [{}] Sales Ops validated", mark(checklist.sales_ops_validated));
    println!(
        "  [{}] Product Mgmt validated",
        mark(checklist.product_mgmt_validated)
    );
    println!(
        "  [{}] Bonus confirmed within {} days",
        mark(checklist.bonus_confirmed_within_sla),
        checklist.confirm_sla_days
    );
}

fn render_program(program: &ProgramConfig) {
    println!("{}", program.program_name);
    println!(
        "- Window: {} months after launch/announce | min order ${} USD | min term {} months | confirmation SLA {} days",
        program.program_months,
        format_whole_dollars(program.min_order_usd),
        program.min_term_months,
        program.confirm_sla_days
    );

    let products: Vec<&str> = program.push_products.iter().map(String::as_str).collect();
    println!("- Push products: {}", products.join(", "));

    let roles = program.roles();
    println!("Base bonus by region & role (USD):");
    for region in program.regions() {
        let amounts: Vec<String> = roles
            .iter()
            .map(|role| {
                let amount = program
                    .base_bonus_by_region_role
                    .get(region)
                    .and_then(|by_role| by_role.get(*role))
                    .copied()
                    .unwrap_or(0.0);
                format!("{role} ${}", format_money(amount))
            })
            .collect();
        println!("  - {region}: {}", amounts.join(" | "));
    }

    println!("Tiers:");
    for tier in &program.tiers {
        let range = match tier.max_value {
            Some(max_value) => format!(
                "${} - ${}",
                format_whole_dollars(tier.min_value),
                format_money(max_value)
            ),
            None => format!("${}+", format_whole_dollars(tier.min_value)),
        };
        let plan: Vec<String> = tier
            .payouts
            .iter()
            .map(|step| format!("{:.0}% at +{}m", step.fraction * 100.0, step.month_offset))
            .collect();
        println!(
            "  - {}: {} | {:.1}x | {}",
            tier.name,
            range,
            tier.multiplier,
            plan.join(", ")
        );
    }

    println!("Quarterly FX (per USD):");
    for (quarter, rates) in &program.fx_by_quarter {
        let rates: Vec<String> = rates
            .iter()
            .map(|(currency, rate)| format!("{currency} {rate:.4}"))
            .collect();
        println!("  - {quarter}: {}", rates.join(" | "));
    }
}

fn mark(checked: bool) -> char {
    if checked {
        'x'
    } else {
        ' '
    }
}

/// Two-decimal amount with thousands separators, e.g. `7,500.00`.
fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round_ties_even() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}{}.{:02}",
        format_whole_dollars((cents / 100) as f64),
        cents % 100
    )
}
