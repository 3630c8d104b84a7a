use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use super::defaults::default_program;
use super::domain::ProgramConfig;
use super::validation::ConfigurationError;

#[derive(Debug, thiserror::Error)]
pub enum ProgramLoadError {
    #[error("unable to read program file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("program definition is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("program definition rejected: {0}")]
    Invalid(#[from] ConfigurationError),
}

impl ProgramConfig {
    /// Parses, normalizes and validates a JSON program definition.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProgramLoadError> {
        let parsed: ProgramConfig = serde_json::from_reader(reader)?;
        let program = parsed.normalized()?;
        program.validate()?;
        Ok(program)
    }

    pub fn from_path(path: &Path) -> Result<Self, ProgramLoadError> {
        let file = File::open(path).map_err(|source| ProgramLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let program = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            program = %program.program_name,
            tiers = program.tiers.len(),
            "loaded program definition"
        );
        Ok(program)
    }

    /// Loads `path` when given, otherwise the built-in program.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ProgramLoadError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(default_program()),
        }
    }

    /// Trims push product names and canonicalizes FX table keys so lookups by
    /// normalized currency codes succeed. Keys that collapse onto the same
    /// quarter and currency are rejected.
    pub fn normalized(mut self) -> Result<Self, ConfigurationError> {
        self.push_products = self
            .push_products
            .into_iter()
            .map(|product| product.trim().to_string())
            .filter(|product| !product.is_empty())
            .collect();

        let mut fx_by_quarter: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (quarter, rates) in self.fx_by_quarter {
            let quarter = quarter.trim().to_ascii_uppercase();
            if quarter.is_empty() {
                continue;
            }
            let entry = fx_by_quarter.entry(quarter.clone()).or_default();
            for (currency, rate) in rates {
                let currency = currency.trim().to_ascii_uppercase();
                if currency.is_empty() {
                    continue;
                }
                if entry.contains_key(&currency) {
                    return Err(ConfigurationError::DuplicateFxRate { quarter, currency });
                }
                entry.insert(currency, rate);
            }
        }
        self.fx_by_quarter = fx_by_quarter;
        Ok(self)
    }
}
