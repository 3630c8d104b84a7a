use serde::{Deserialize, Serialize};

use super::super::calendar::{add_average_months, format_whole_dollars};
use super::super::domain::{DealInput, ProgramConfig};

/// Reasons a deal falls outside the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Disqualification {
    ExistingCustomer,
    NotPushProduct,
    OrderBelowMinimum { minimum_usd: f64 },
    TermBelowMinimum { minimum_months: u32 },
    OutsideProgramWindow { program_months: u32 },
}

impl Disqualification {
    pub fn summary(&self) -> String {
        match self {
            Disqualification::ExistingCustomer => "Customer is not new.".to_string(),
            Disqualification::NotPushProduct => {
                "Product is not a designated push product.".to_string()
            }
            Disqualification::OrderBelowMinimum { minimum_usd } => format!(
                "Order value below ${} USD minimum.",
                format_whole_dollars(*minimum_usd)
            ),
            Disqualification::TermBelowMinimum { minimum_months } => {
                format!("Contract term below {minimum_months} months.")
            }
            Disqualification::OutsideProgramWindow { program_months } => format!(
                "Signing date outside program window ({program_months} months post launch/announce)."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct EligibilityOutcome {
    pub reasons: Vec<Disqualification>,
}

impl EligibilityOutcome {
    pub fn eligible(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Runs every eligibility check; failures accumulate rather than short-circuit.
pub(crate) fn check_eligibility(deal: &DealInput, config: &ProgramConfig) -> EligibilityOutcome {
    let mut reasons = Vec::new();

    if !deal.is_new_customer {
        reasons.push(Disqualification::ExistingCustomer);
    }
    if !deal.product_type_push {
        reasons.push(Disqualification::NotPushProduct);
    }
    if !deal.meets_order_minimum(config.min_order_usd) {
        reasons.push(Disqualification::OrderBelowMinimum {
            minimum_usd: config.min_order_usd,
        });
    }
    if !deal.meets_term_minimum(config.min_term_months) {
        reasons.push(Disqualification::TermBelowMinimum {
            minimum_months: config.min_term_months,
        });
    }
    if !within_program_window(deal, config.program_months) {
        reasons.push(Disqualification::OutsideProgramWindow {
            program_months: config.program_months,
        });
    }

    EligibilityOutcome { reasons }
}

fn within_program_window(deal: &DealInput, program_months: u32) -> bool {
    if deal.signing_date < deal.launch_date {
        return false;
    }
    match add_average_months(deal.launch_date, program_months) {
        Some(window_end) => deal.signing_date <= window_end,
        // Window runs past the end of the calendar, so any later signing date is inside it.
        None => true,
    }
}
