//! Free-tier gate.
//!
//! Free users may clean a limited number of references per submission;
//! a premium access code lifts the limit. The gate only counts lines and
//! never looks at their content.

use thiserror::Error;
use tracing::debug;

use crate::clean::count_references;
use crate::config::AccessCodes;

/// Reasons a submission is turned away before cleaning.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuotaError {
    #[error("no references found in input")]
    EmptyInput,

    #[error("you entered {count} references, but the free version cleans up to {limit}")]
    LimitExceeded { count: usize, limit: usize },
}

/// Access level for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Entitlement {
    #[default]
    Free,
    Premium,
}

impl Entitlement {
    /// Resolves the entitlement granted by an optional access code.
    ///
    /// Unknown codes fall back to [`Entitlement::Free`].
    pub fn from_code(code: Option<&str>, codes: &AccessCodes) -> Self {
        match code {
            Some(code) if codes.accepts(code) => Entitlement::Premium,
            _ => Entitlement::Free,
        }
    }

    pub fn is_premium(self) -> bool {
        self == Entitlement::Premium
    }
}

/// Line-count ceiling applied to free submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeTier {
    max_free_lines: usize,
}

impl FreeTier {
    pub fn new(max_free_lines: usize) -> Self {
        FreeTier { max_free_lines }
    }

    pub fn limit(&self) -> usize {
        self.max_free_lines
    }

    /// Checks a submission of `count` references.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::LimitExceeded`] when a free submission is over the
    /// ceiling. Premium submissions always pass.
    pub fn check(&self, count: usize, entitlement: Entitlement) -> Result<(), QuotaError> {
        if entitlement.is_premium() || count <= self.max_free_lines {
            debug!(count, limit = self.max_free_lines, ?entitlement, "submission accepted");
            return Ok(());
        }
        Err(QuotaError::LimitExceeded {
            count,
            limit: self.max_free_lines,
        })
    }
}

/// Counts the references in `text`, rejecting input with none.
pub fn check_input(text: &str) -> Result<usize, QuotaError> {
    match count_references(text) {
        0 => Err(QuotaError::EmptyInput),
        count => Ok(count),
    }
}
