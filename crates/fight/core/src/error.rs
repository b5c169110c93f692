//! Error classification shared by every fallible fight API.
//!
//! Each error enum lives next to the code that raises it
//! ([`crate::SimulationError`], [`crate::ApplyError`], [`crate::StepLogError`])
//! and implements [`FightError`], so a caller can tell a rejected input from a
//! broken invariant without matching on concrete variants.

use serde::{Deserialize, Serialize};

/// How bad an error is, from the caller's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Nothing was corrupted; the caller may carry on.
    Recoverable,
    /// The input breaks the contract (e.g. a malformed step log).
    Validation,
    /// The fight logic broke one of its own guarantees.
    Internal,
    /// Continuing would leave fighters or playback inconsistent.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Whether the operation that raised the error must be abandoned.
    pub const fn aborts(self) -> bool {
        !matches!(self, Self::Recoverable)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait FightError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable, SCREAMING_SNAKE identifier of the variant.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_are_ordered_by_gravity() {
        assert!(ErrorSeverity::Recoverable < ErrorSeverity::Validation);
        assert!(ErrorSeverity::Internal < ErrorSeverity::Fatal);
        assert!(!ErrorSeverity::Recoverable.aborts());
        assert!(ErrorSeverity::Validation.aborts());
        assert_eq!(ErrorSeverity::Fatal.to_string(), "fatal");
    }
}
