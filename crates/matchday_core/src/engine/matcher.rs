//! Instant matching
//!
//! Finds corpus instants compatible with the live field state, or instants of the same
//! shape as an already-matched one but with a required kind of outcome. The fallbacks
//! always terminate: generic classes return the initial instant, specific classes
//! degrade to [`OutcomeClass::Opposition`].

use crate::models::codes::{possession_change, result_code};
use crate::models::{FieldState, Instant, Outcome, PressureCode, TacticLine};
use crate::rng::RandomSource;

/// Outcome kind the resolver wants to play out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    /// Any possession change.
    Opposition,
    /// Ball kept (or contested) without a foul.
    SuccessOrChallenge,
    PassInterception,
    ManChallengeLost,
    /// Possession lost without an opponent forcing it.
    Unforced,
    GkInterception,
    /// Crosses only: the cross leads to a chance on goal.
    GoalOpportunityCross,
}

impl OutcomeClass {
    /// Possession-change code a specific class stands for.
    pub fn possession_change(self) -> Option<u8> {
        match self {
            OutcomeClass::PassInterception => Some(possession_change::PASS_INTERCEPTION),
            OutcomeClass::ManChallengeLost => Some(possession_change::MAN_CHALLENGE_LOST),
            OutcomeClass::Unforced => Some(possession_change::NORMAL),
            OutcomeClass::GkInterception => Some(possession_change::GK),
            _ => None,
        }
    }

    fn is_generic(self) -> bool {
        matches!(self, OutcomeClass::Opposition | OutcomeClass::SuccessOrChallenge)
    }

    fn admits(self, outcome: &Outcome) -> bool {
        match self {
            OutcomeClass::Opposition => outcome.is_opponent(),
            OutcomeClass::SuccessOrChallenge => {
                (outcome.is_success() || outcome.is_challenge())
                    && !outcome.condition().map(result_code::is_foul).unwrap_or(false)
            }
            OutcomeClass::GoalOpportunityCross => outcome.is_goal_scoring_opportunity(),
            specific => outcome.possession_change().is_some()
                && outcome.possession_change() == specific.possession_change(),
        }
    }

    /// Cross variant: success-or-challenge does not filter fouls.
    fn admits_cross(self, outcome: &Outcome) -> bool {
        match self {
            OutcomeClass::SuccessOrChallenge => outcome.is_success() || outcome.is_challenge(),
            other => other.admits(outcome),
        }
    }
}

/// Whether the instant was recorded under the same coarse pressure.
pub fn pressure_matched(instant: &Instant, pressed: bool) -> bool {
    match instant.pressure {
        PressureCode::Under | PressureCode::Avoid => pressed,
        PressureCode::Clear => !pressed,
    }
}

/// Instants playable from `state` by a player on `line`.
pub fn find_candidates<'a>(
    corpus: &'a [Instant],
    state: &FieldState,
    line: TacticLine,
) -> Vec<&'a Instant> {
    corpus
        .iter()
        .filter(|i| {
            i.y == state.y
                && i.x == state.x
                && state.pressure.matches_code(i.pressure)
                && i.action.allowed_for(line)
        })
        .collect()
}

fn choose(pool: &[&Instant], rng: &mut dyn RandomSource) -> Instant {
    if pool.len() == 1 {
        return pool[0].clone();
    }
    pool[rng.next_index(pool.len())].clone()
}

/// Same-shape instant with an outcome of `class`, preferring the pressure the ball
/// holder is under.
pub fn find_matching_instant(
    corpus: &[Instant],
    init: &Instant,
    class: OutcomeClass,
    pressed: bool,
    rng: &mut dyn RandomSource,
) -> Instant {
    let pace: Vec<&Instant> = corpus
        .iter()
        .filter(|i| i.same_shape(init) && class.admits(&i.outcome))
        .collect();
    let pressured: Vec<&Instant> =
        pace.iter().copied().filter(|i| pressure_matched(i, pressed)).collect();

    if !pressured.is_empty() {
        return choose(&pressured, rng);
    }
    if !pace.is_empty() {
        log::debug!("No {:?} instant under matching pressure, ignoring pressure", class);
        return pace[rng.next_index(pace.len())].clone();
    }
    if class.is_generic() {
        log::debug!("No {:?} instant of this shape, keeping row {}", class, init.row_id);
        return init.clone();
    }
    log::debug!("No {:?} instant of this shape, falling back to opposition", class);
    find_matching_instant(corpus, init, OutcomeClass::Opposition, pressed, rng)
}

/// Cross matching: no pressure preference.
pub fn find_matching_cross(
    corpus: &[Instant],
    init: &Instant,
    class: OutcomeClass,
    rng: &mut dyn RandomSource,
) -> Instant {
    let pool: Vec<&Instant> = corpus
        .iter()
        .filter(|i| i.same_shape(init) && class.admits_cross(&i.outcome))
        .collect();
    if !pool.is_empty() {
        return choose(&pool, rng);
    }
    match class {
        OutcomeClass::Opposition
        | OutcomeClass::SuccessOrChallenge
        | OutcomeClass::GoalOpportunityCross => init.clone(),
        _ => find_matching_instant(corpus, init, OutcomeClass::Opposition, true, rng),
    }
}
