//! Step log decoding with per-step diagnostics.
//!
//! [`StepLog::from_json`] rejects a bad log as a whole. Players need to know
//! *which* step broke the contract and whether it was an unknown kind (a log
//! written by a newer simulator) or a malformed record, so decoding goes
//! through [`serde_json::Value`] first.

use fight_core::{Step, StepKind, StepLog};
use serde_json::Value;

use crate::error::{PlaybackError, Result};

pub fn decode_step_log(json: &str) -> Result<StepLog> {
    let records: Vec<Value> = serde_json::from_str(json).map_err(PlaybackError::MalformedJson)?;

    let steps = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| decode_step(index, record))
        .collect::<Result<Vec<_>>>()?;

    Ok(StepLog::new(steps)?)
}

fn decode_step(index: usize, record: Value) -> Result<Step> {
    let Some(kind) = record.get("kind").and_then(Value::as_str) else {
        return Err(PlaybackError::MalformedStep {
            index,
            message: "missing string field `kind`".to_string(),
        });
    };
    if StepKind::parse(kind).is_none() {
        return Err(PlaybackError::UnknownStepKind {
            index,
            kind: kind.to_string(),
        });
    }

    serde_json::from_value(record).map_err(|err| PlaybackError::MalformedStep {
        index,
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use fight_core::FighterId;

    use super::*;

    #[test]
    fn decodes_valid_logs() {
        let log = decode_step_log(
            r#"[{"kind":"heal","brute":0,"amount":15,"poisonHeal":false},
                {"kind":"end","w":0,"l":1,"forced":true}]"#,
        )
        .unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.outcome(), (FighterId(0), FighterId(1), true));
    }

    #[test]
    fn unknown_kind_names_the_step() {
        let err = decode_step_log(
            r#"[{"kind":"teleport","b":0},{"kind":"end","w":0,"l":1,"forced":false}]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlaybackError::UnknownStepKind { index: 0, ref kind } if kind == "teleport"
        ));
    }

    #[test]
    fn malformed_records_are_reported() {
        let err = decode_step_log(r#"[{"kind":"hit","b":0},{"kind":"end","w":0,"l":1}]"#)
            .unwrap_err();
        assert!(matches!(err, PlaybackError::MalformedStep { index: 0, .. }));

        let err = decode_step_log(r#"[{"b":0}]"#).unwrap_err();
        assert!(matches!(err, PlaybackError::MalformedStep { index: 0, .. }));

        assert!(matches!(
            decode_step_log("{}"),
            Err(PlaybackError::MalformedJson(_))
        ));
    }

    #[test]
    fn shape_errors_surface_as_invalid_log() {
        let err = decode_step_log(r#"[{"kind":"death","b":1}]"#).unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidLog(_)));
    }
}
