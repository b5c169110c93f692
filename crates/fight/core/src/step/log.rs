use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::error::{ErrorSeverity, FightError};
use crate::fighter::FighterId;

use super::{Step, StepKind};

/// Shape errors of a step log.
#[derive(Debug, Error)]
pub enum StepLogError {
    #[error("step log is empty")]
    Empty,

    #[error("step log ends with `{kind}` at index {index} instead of `end`")]
    NotTerminal { index: usize, kind: StepKind },

    #[error("`end` at index {index} is followed by further steps")]
    EndNotLast { index: usize },

    #[error("step log is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl FightError for StepLogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "STEP_LOG_EMPTY",
            Self::NotTerminal { .. } => "STEP_LOG_NOT_TERMINAL",
            Self::EndNotLast { .. } => "STEP_LOG_END_NOT_LAST",
            Self::Json(_) => "STEP_LOG_JSON",
        }
    }
}

/// A complete fight: a non-empty sequence of steps whose only `end` is last.
///
/// Deserialization runs the same validation as [`StepLog::new`], so a decoded
/// log is always total and terminal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct StepLog {
    steps: Vec<Step>,
}

impl StepLog {
    pub fn new(steps: Vec<Step>) -> Result<Self, StepLogError> {
        let Some(last) = steps.last() else {
            return Err(StepLogError::Empty);
        };
        if !last.is_terminal() {
            return Err(StepLogError::NotTerminal {
                index: steps.len() - 1,
                kind: last.kind(),
            });
        }
        if let Some(index) = steps[..steps.len() - 1]
            .iter()
            .position(Step::is_terminal)
        {
            return Err(StepLogError::EndNotLast { index });
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The terminal step's `(winner, loser, forced)`.
    pub fn outcome(&self) -> (FighterId, FighterId, bool) {
        match self.steps.last() {
            Some(&Step::End {
                winner,
                loser,
                forced,
            }) => (winner, loser, forced),
            // Unreachable through the validated constructors.
            _ => (FighterId::LEFT, FighterId::RIGHT, true),
        }
    }

    pub fn to_json(&self) -> Result<String, StepLogError> {
        Ok(serde_json::to_string(&self.steps)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, StepLogError> {
        Ok(serde_json::to_string_pretty(&self.steps)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StepLogError> {
        let steps: Vec<Step> = serde_json::from_str(json)?;
        Self::new(steps)
    }

    /// SHA-256 of the compact JSON encoding.
    pub fn digest(&self) -> Result<[u8; 32], StepLogError> {
        let bytes = serde_json::to_vec(&self.steps)?;
        Ok(Sha256::digest(&bytes).into())
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl TryFrom<Vec<Step>> for StepLog {
    type Error = StepLogError;

    fn try_from(steps: Vec<Step>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<StepLog> for Vec<Step> {
    fn from(log: StepLog) -> Self {
        log.steps
    }
}

impl<'a> IntoIterator for &'a StepLog {
    type Item = &'a Step;
    type IntoIter = core::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: FighterId = FighterId(0);
    const B: FighterId = FighterId(1);

    fn end() -> Step {
        Step::End {
            winner: A,
            loser: B,
            forced: false,
        }
    }

    #[test]
    fn rejects_empty_and_open_logs() {
        assert!(matches!(StepLog::new(vec![]), Err(StepLogError::Empty)));
        assert!(matches!(
            StepLog::new(vec![Step::MoveBack { brute: A }]),
            Err(StepLogError::NotTerminal {
                index: 0,
                kind: StepKind::MoveBack
            })
        ));
        assert!(matches!(
            StepLog::new(vec![end(), Step::Death { brute: B }, end()]),
            Err(StepLogError::EndNotLast { index: 0 })
        ));
    }

    #[test]
    fn deserialization_validates() {
        let err = StepLog::from_json(r#"[{"kind":"death","b":1}]"#).unwrap_err();
        assert!(matches!(err, StepLogError::NotTerminal { .. }));

        let direct: Result<StepLog, _> = serde_json::from_str("[]");
        assert!(direct.is_err());
    }

    #[test]
    fn json_roundtrip_keeps_digest() {
        let log = StepLog::new(vec![Step::Death { brute: B }, end()]).unwrap();
        let json = log.to_json().unwrap();
        assert_eq!(json, r#"[{"kind":"death","b":1},{"kind":"end","w":0,"l":1,"forced":false}]"#);

        let decoded = StepLog::from_json(&json).unwrap();
        assert_eq!(decoded, log);
        assert_eq!(decoded.digest().unwrap(), log.digest().unwrap());
        assert_eq!(decoded.outcome(), (A, B, false));
    }
}
