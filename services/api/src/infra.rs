use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bonus_accelerator::program::ProgramConfig;
use bonus_accelerator::program::ProgramLoadError;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Program file given on the command line wins over the environment; with
/// neither, the built-in program is used.
pub(crate) fn load_program(
    cli_path: Option<&Path>,
    env_path: Option<&Path>,
) -> Result<ProgramConfig, ProgramLoadError> {
    ProgramConfig::load_or_default(cli_path.or(env_path))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
