use chrono::{DateTime, SecondsFormat, Utc};

use super::super::domain::{AuditRecord, DealInput, ProgramConfig, TierRule};

/// Fixed tag identifying where the program snapshot came from.
pub const CONFIG_VERSION: &str = "session";

pub(crate) fn record_audit(
    config: &ProgramConfig,
    deal: &DealInput,
    tier: &TierRule,
    computed_at: DateTime<Utc>,
) -> AuditRecord {
    AuditRecord {
        program: config.program_name.clone(),
        computed_at: computed_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        input: deal.clone(),
        config_version: CONFIG_VERSION.to_string(),
        tier_rule: tier.clone(),
    }
}
