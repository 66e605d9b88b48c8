//! Double-progression load suggestions
//!
//! Load goes up only after the two most recent sessions of an exercise both
//! reached the top of the rep range on at least two working sets. Older
//! sessions are never consulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exercises::is_lower_body;

const MIN_EXPOSURES: usize = 2;
const MIN_SETS_AT_TOP: usize = 2;

const LOWER_BODY_INCREASE_PERCENT: f64 = 5.0;
const UPPER_BODY_INCREASE_PERCENT: f64 = 2.5;
const LOWER_BODY_INCREMENT_KG: f64 = 2.5;
const UPPER_BODY_INCREMENT_KG: f64 = 1.25;

const REASON: &str = "Hit the top of the rep range on at least two working sets in each of the \
    last two sessions. Add load and work back up through the range.";

/// One completed workout that included the exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionExposure {
    pub workout_id: i64,
    pub completed_at: DateTime<Utc>,
    pub target_rep_high: u32,
    pub working_set_reps: Vec<u32>,
    pub top_load_kg: f64,
}

impl ProgressionExposure {
    /// At least two working sets, and at least two of them at or above the
    /// top of the rep range
    pub fn qualifies(&self) -> bool {
        if self.working_set_reps.len() < MIN_SETS_AT_TOP {
            return false;
        }

        let at_top = self
            .working_set_reps
            .iter()
            .filter(|reps| **reps >= self.target_rep_high)
            .count();
        at_top >= MIN_SETS_AT_TOP
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSuggestion {
    pub exercise_id: String,
    pub suggested_load_kg: f64,
    pub increase_percent: f64,
    pub reason: String,
}

/// Load bump and plate rounding for an exercise
fn increase_for(exercise_id: &str) -> (f64, f64) {
    if is_lower_body(exercise_id) {
        (LOWER_BODY_INCREASE_PERCENT, LOWER_BODY_INCREMENT_KG)
    } else {
        (UPPER_BODY_INCREASE_PERCENT, UPPER_BODY_INCREMENT_KG)
    }
}

/// Evaluates the two most recent exposures (most recent first).
///
/// Returns `None` with fewer than two exposures or when either of the two
/// fails to qualify. A bodyweight pair at 0 kg still gets a suggestion of 0 kg.
pub fn evaluate_double_progression(
    exercise_id: &str,
    exposures: &[ProgressionExposure],
) -> Option<ProgressionSuggestion> {
    if exposures.len() < MIN_EXPOSURES {
        return None;
    }

    let recent = &exposures[..MIN_EXPOSURES];
    if !recent.iter().all(ProgressionExposure::qualifies) {
        return None;
    }

    let base_load = recent
        .iter()
        .map(|e| e.top_load_kg)
        .fold(f64::NEG_INFINITY, f64::max);
    if !base_load.is_finite() {
        return None;
    }

    let (increase_percent, increment) = increase_for(exercise_id);
    let target = base_load * (1.0 + increase_percent / 100.0);
    let suggested_load_kg = (target / increment).round() * increment;

    Some(ProgressionSuggestion {
        exercise_id: exercise_id.to_string(),
        suggested_load_kg,
        increase_percent,
        reason: REASON.to_string(),
    })
}
