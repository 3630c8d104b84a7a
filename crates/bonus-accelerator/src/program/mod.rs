//! Sales bonus accelerator program: the deal evaluation engine plus the
//! snapshot loading, export, history and HTTP surfaces built around it.
//!
//! The engine in [`evaluation`] is a pure function of a [`DealInput`] and a
//! [`ProgramConfig`] snapshot. Everything stateful (the active snapshot, the
//! recent results log) lives in [`service`].

pub mod calendar;
mod defaults;
pub mod domain;
pub mod evaluation;
pub mod export;
pub mod history;
pub mod loader;
pub mod router;
pub mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::QuarterKey;
pub use defaults::{default_program, DEFAULT_PROGRAM_NAME};
pub use domain::{
    AuditRecord, ComplianceChecklist, DealInput, DealResult, Payout, PayoutStep, ProgramConfig,
    TierRule,
};
pub use evaluation::{evaluate, evaluate_at, Disqualification, REFERENCE_CURRENCY};
pub use export::{ExportError, ExportFormat};
pub use history::{DealRecord, ResultLog, ResultLogError};
pub use loader::ProgramLoadError;
pub use router::deal_router;
pub use service::{DealEvaluationService, DealServiceError, DealSubmission};
pub use validation::ConfigurationError;
