use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{DealInput, ProgramConfig};
use super::evaluation::{evaluate, REFERENCE_CURRENCY};
use super::history::{DealRecord, ResultLog, ResultLogError};
use super::validation::ConfigurationError;

/// Deal as submitted by a caller. Optional fields fall back to the program:
/// the push flag defaults to membership in the program's push products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealSubmission {
    pub product: String,
    pub region: String,
    pub role: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub annual_order_value: f64,
    pub contract_term_months: i32,
    pub signing_date: NaiveDate,
    #[serde(alias = "launch_or_announce_date")]
    pub launch_date: NaiveDate,
    #[serde(default = "default_new_customer")]
    pub is_new_customer: bool,
    #[serde(default)]
    pub product_type_push: Option<bool>,
    #[serde(default)]
    pub external_ref: String,
}

fn default_currency() -> String {
    REFERENCE_CURRENCY.to_string()
}

fn default_new_customer() -> bool {
    true
}

impl DealSubmission {
    pub fn into_deal(self, program: &ProgramConfig) -> DealInput {
        let product_type_push = self
            .product_type_push
            .unwrap_or_else(|| program.is_push_product(&self.product));

        DealInput {
            product: self.product,
            region: self.region,
            role: self.role,
            currency: self.currency,
            annual_order_value: self.annual_order_value,
            contract_term_months: self.contract_term_months,
            signing_date: self.signing_date,
            launch_date: self.launch_date,
            is_new_customer: self.is_new_customer,
            product_type_push,
            external_ref: self.external_ref,
        }
    }
}

/// Holds the active program snapshot and the recent results log around the
/// stateless engine.
pub struct DealEvaluationService<L> {
    program: RwLock<Arc<ProgramConfig>>,
    log: Arc<L>,
}

impl<L> DealEvaluationService<L>
where
    L: ResultLog + 'static,
{
    pub fn new(program: ProgramConfig, log: Arc<L>) -> Self {
        Self {
            program: RwLock::new(Arc::new(program)),
            log,
        }
    }

    /// The snapshot new evaluations run against.
    pub fn program(&self) -> Arc<ProgramConfig> {
        self.program
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Validates `program` and makes it the active snapshot. Evaluations
    /// already running keep the snapshot they started with.
    pub fn replace_program(
        &self,
        program: ProgramConfig,
    ) -> Result<Arc<ProgramConfig>, DealServiceError> {
        let program = program.normalized()?;
        program.validate()?;
        let program = Arc::new(program);
        *self.program.write().unwrap_or_else(PoisonError::into_inner) = program.clone();
        info!(
            program = %program.program_name,
            tiers = program.tiers.len(),
            "program snapshot replaced"
        );
        Ok(program)
    }

    /// Evaluates and appends the record to the recent results log.
    pub fn evaluate(&self, submission: DealSubmission) -> Result<DealRecord, DealServiceError> {
        let record = self.preview(submission)?;
        self.log.append(record.clone())?;
        Ok(record)
    }

    /// Evaluates against the active snapshot without touching the log.
    pub fn preview(&self, submission: DealSubmission) -> Result<DealRecord, DealServiceError> {
        let program = self.program();
        let deal = submission.into_deal(&program);
        let result = evaluate(&deal, &program)?;
        Ok(DealRecord { deal, result })
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<DealRecord>, DealServiceError> {
        Ok(self.log.recent(limit)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DealServiceError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Log(#[from] ResultLogError),
}
