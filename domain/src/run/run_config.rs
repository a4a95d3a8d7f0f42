//! Run configuration value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifies an isolated conversation lineage and bounds the rewrite loop.
///
/// Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    thread_id: String,
    max_rewrites: u32,
}

impl RunConfig {
    /// Create a run config
    pub fn new(thread_id: impl Into<String>, max_rewrites: u32) -> Result<Self, DomainError> {
        let thread_id = thread_id.into();
        if thread_id.trim().is_empty() {
            return Err(DomainError::InvalidRunConfig(
                "thread id cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            thread_id,
            max_rewrites,
        })
    }

    /// Create a run config from an untrusted signed rewrite budget
    pub fn from_signed(thread_id: impl Into<String>, max_rewrites: i64) -> Result<Self, DomainError> {
        let max_rewrites = u32::try_from(max_rewrites).map_err(|_| {
            DomainError::InvalidRunConfig(format!(
                "max_rewrites must be between 0 and {}, got {}",
                u32::MAX,
                max_rewrites
            ))
        })?;
        Self::new(thread_id, max_rewrites)
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn max_rewrites(&self) -> u32 {
        self.max_rewrites
    }
}
