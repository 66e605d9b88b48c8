//! Analytics module - training volume, progression and rate analysis
//!
//! Features:
//! - Effective-set volume per muscle group with zone classification
//! - Double-progression load suggestions
//! - Estimated 1RM trend vs. reference progression curves (linfa for fit quality)
//! - Rolling weeks anchored on the first completed workout

pub mod one_rep_max;
pub mod phase;
pub mod progression;
pub mod progression_rate;
pub mod rolling_week;
pub mod volume;

pub use one_rep_max::estimate_one_rep_max;
pub use phase::{classify_training_phase, PhaseInfo, TrainingPhase};
pub use progression::{evaluate_double_progression, ProgressionExposure, ProgressionSuggestion};
pub use progression_rate::{
    calculate_progression_rate, linear_regression_slope, ProgressionRateResult, StrengthTrendPoint,
};
pub use rolling_week::{
    get_rolling_week_window, rolling_week_window_at, weekly_adherence, Adherence, RollingWeekWindow,
};
pub use volume::{calculate_volume, LoggedSet, MuscleVolumeResult, VolumeZone};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::db::Database;
use rolling_week::{check_window, parse_iso, weeks_between};

/// Exposures the progression rule looks at
const PROGRESSION_EXPOSURES: usize = 2;

/// Everything shown for the current rolling week
#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    pub window: RollingWeekWindow,
    pub phase: PhaseInfo,
    pub adherence: Adherence,
    pub volume: Vec<MuscleVolumeResult>,
}

/// Training analytics over a store
pub struct Analytics<'a> {
    db: &'a Database,
}

impl<'a> Analytics<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Volume per muscle group for sets of completed workouts in `[start, end)`
    pub fn calculate_volume_for_date_range(
        &self,
        start_iso: &str,
        end_iso: &str,
    ) -> Result<Vec<MuscleVolumeResult>> {
        let start = parse_iso("start", start_iso)?;
        let end = parse_iso("end", end_iso)?;
        self.volume_between(start, end)
    }

    /// Fails on an empty or inverted range
    pub fn volume_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MuscleVolumeResult>> {
        check_window(start, end)?;
        let sets = self.db.get_sets_by_date_range(start, end)?;
        debug!("Calculating volume from {} sets", sets.len());
        Ok(calculate_volume(&sets))
    }

    /// Rolling week containing `now`; None until a workout is completed
    pub fn current_week(&self, now: DateTime<Utc>) -> Result<Option<RollingWeekWindow>> {
        let anchor = self.db.first_workout_anchor()?;
        Ok(anchor.map(|a| rolling_week_window_at(now, a)))
    }

    /// Phase by weeks since the first completed workout
    pub fn training_phase(&self, now: DateTime<Utc>) -> Result<Option<PhaseInfo>> {
        let anchor = self.db.first_workout_anchor()?;
        Ok(anchor.map(|a| classify_training_phase(weeks_between(a, now))))
    }

    pub fn adherence(&self, window: &RollingWeekWindow, planned: u32) -> Result<Adherence> {
        let completed = self.db.count_completed_workouts_between(window.start, window.end)?;
        Ok(weekly_adherence(completed, planned)?)
    }

    /// Window, phase, adherence and volume of the current rolling week
    pub fn week_summary(&self, now: DateTime<Utc>, planned: u32) -> Result<Option<WeekSummary>> {
        let Some(anchor) = self.db.first_workout_anchor()? else {
            return Ok(None);
        };

        let window = rolling_week_window_at(now, anchor);
        let adherence = self.adherence(&window, planned)?;
        let volume = self.volume_between(window.start, window.end)?;

        Ok(Some(WeekSummary {
            phase: classify_training_phase(weeks_between(anchor, now)),
            window,
            adherence,
            volume,
        }))
    }

    pub fn suggest_progression(&self, exercise_id: &str) -> Result<Option<ProgressionSuggestion>> {
        let exposures = self.db.get_recent_exercise_exposures(exercise_id, PROGRESSION_EXPOSURES)?;
        let suggestion = evaluate_double_progression(exercise_id, &exposures);
        debug!(
            "Progression check for {} over {} exposures: {:?}",
            exercise_id,
            exposures.len(),
            suggestion.as_ref().map(|s| s.suggested_load_kg)
        );
        Ok(suggestion)
    }

    pub fn progression_rate(&self, exercise_id: &str) -> Result<ProgressionRateResult> {
        let series = self.db.get_strength_trend_series(exercise_id)?;
        Ok(calculate_progression_rate(exercise_id, &series))
    }
}
