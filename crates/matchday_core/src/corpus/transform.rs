//! Raw records to typed [`Instant`]s

use super::loader::RawRecord;
use crate::error::{MatchError, Result};
use crate::models::codes::{result_desc, team_code};
use crate::models::{Action, FieldX, FieldY, Instant, Outcome, OutcomeState, PressureCode};

/// Outcome condition of plain "condition" rows.
const COND_NORMAL: u8 = 0;

fn unknown(field: &'static str, value: u8, row: u8) -> MatchError {
    MatchError::UnknownCode { field, value, row }
}

fn tagged<T>(res: Result<T>, row: u8) -> Result<T> {
    res.map_err(|e| match e {
        MatchError::UnknownCode { field, value, .. } => unknown(field, value, row),
        other => other,
    })
}

fn outcome_of(r: &RawRecord) -> Result<Outcome> {
    let team = r.result_team();
    match r.result_desc() {
        result_desc::CONDITION => match team {
            team_code::OPP => Ok(Outcome::Opponent {
                condition: COND_NORMAL,
                possession_change: r.possession_change(),
            }),
            team_code::OWN => Ok(Outcome::Success { condition: COND_NORMAL }),
            value => Err(unknown("ResultTeam", value, r.row_id())),
        },
        result_desc::CHALLENGE => Ok(Outcome::Challenge {
            start_team: r.challenge_team(),
            start_y: r.challenge_y(),
            end_team: team,
            end_y: r.result_y(),
            end_x: r.result_x(),
            ending: r.challenge_ending(),
            kind: r.challenge_type(),
        }),
        result_desc::OTHER => match team {
            team_code::OWN => Ok(Outcome::Success { condition: r.other_result() }),
            team_code::OPP => Ok(Outcome::Opponent {
                condition: r.other_result(),
                possession_change: r.possession_change(),
            }),
            value => Err(unknown("ResultTeam", value, r.row_id())),
        },
        value => Err(unknown("ResultDesc", value, r.row_id())),
    }
}

pub fn transform_record(r: &RawRecord) -> Result<Instant> {
    let row = r.row_id();
    Ok(Instant {
        y: tagged(FieldY::from_code(r.y()), row)?,
        x: tagged(FieldX::from_code(r.x()), row)?,
        pressure: tagged(PressureCode::from_code(r.pressure()), row)?,
        action: tagged(Action::from_code(r.action()), row)?,
        outcome: outcome_of(r)?,
        outcome_state: OutcomeState {
            y: r.result_y(),
            x: r.result_x(),
            pressure: r.result_pressure(),
        },
        row_id: row,
    })
}

/// Transforms the whole corpus; the first bad record aborts it.
pub fn transform(records: &[RawRecord]) -> Result<Vec<Instant>> {
    let instants = records.iter().map(transform_record).collect::<Result<Vec<_>>>()?;
    log::debug!("Transformed {} corpus instants", instants.len());
    Ok(instants)
}
