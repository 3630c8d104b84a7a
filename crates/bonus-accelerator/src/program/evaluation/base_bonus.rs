use super::super::domain::ProgramConfig;

/// Flat base bonus for a region/role pair; unmapped pairs earn nothing.
pub(crate) fn lookup_base_bonus(region: &str, role: &str, config: &ProgramConfig) -> f64 {
    config
        .base_bonus_by_region_role
        .get(region)
        .and_then(|roles| roles.get(role))
        .copied()
        .unwrap_or(0.0)
}
