use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::domain::{DealInput, DealResult};

/// Number of evaluations a [`BoundedResultLog`] keeps by default.
pub const RECENT_RESULTS_CAPACITY: usize = 25;

/// A submitted deal paired with its evaluation, as kept in the recent log and
/// returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub deal: DealInput,
    pub result: DealResult,
}

/// Append-only log of recent evaluations owned by the caller of the engine.
pub trait ResultLog: Send + Sync {
    fn append(&self, record: DealRecord) -> Result<(), ResultLogError>;
    /// Newest first, at most `limit` entries.
    fn recent(&self, limit: usize) -> Result<Vec<DealRecord>, ResultLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResultLogError {
    #[error("result log unavailable: {0}")]
    Unavailable(String),
}

/// In-memory log that forgets the oldest entries past its capacity.
#[derive(Debug)]
pub struct BoundedResultLog {
    capacity: usize,
    records: Mutex<VecDeque<DealRecord>>,
}

impl BoundedResultLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }
}

impl Default for BoundedResultLog {
    fn default() -> Self {
        Self::with_capacity(RECENT_RESULTS_CAPACITY)
    }
}

impl ResultLog for BoundedResultLog {
    fn append(&self, record: DealRecord) -> Result<(), ResultLogError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| ResultLogError::Unavailable("result log mutex poisoned".to_string()))?;
        guard.push_front(record);
        guard.truncate(self.capacity);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<DealRecord>, ResultLogError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| ResultLogError::Unavailable("result log mutex poisoned".to_string()))?;
        Ok(guard.iter().take(limit).cloned().collect())
    }
}
