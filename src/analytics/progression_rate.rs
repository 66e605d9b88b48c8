//! Strength progression rate vs. published reference curves
//!
//! Each completed workout contributes its best set (highest estimated 1RM).
//! The weekly rate is the least-squares slope of estimated 1RM over weeks
//! since the first session.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::one_rep_max::estimate_one_rep_max;
use super::rolling_week::weeks_between;

/// Minimum sessions before a rate is reported
const MIN_SESSIONS: usize = 4;
/// Minimum span between first and last session, in weeks
const MIN_WEEKS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionPoint {
    pub x: f64,
    pub y: f64,
}

/// Best set of one completed workout for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthTrendPoint {
    pub workout_id: i64,
    pub exercise_id: String,
    pub exercise_name: String,
    pub completed_at: DateTime<Utc>,
    pub best_set_reps: u32,
    pub best_set_load_kg: f64,
}

/// A logged set of the target exercise with its workout's completion time
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSet {
    pub workout_id: i64,
    pub exercise_id: String,
    pub exercise_name: String,
    pub completed_at: DateTime<Utc>,
    pub reps: u32,
    pub load_kg: f64,
    pub is_warmup: bool,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceSegment {
    pub from_week: f64,
    pub to_week: f64,
    pub rate_kg_per_week: f64,
}

/// Reference progression curve for one exercise. Segments are ordered and
/// the last one extends past its `to_week`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressionReference {
    pub exercise_id: &'static str,
    pub label: &'static str,
    pub caveat: &'static str,
    pub segments: &'static [ReferenceSegment],
}

impl ProgressionReference {
    /// Segment whose `[from_week, to_week)` contains `weeks`, else the last one
    pub fn segment_at(&self, weeks: f64) -> Option<&'static ReferenceSegment> {
        self.segments
            .iter()
            .find(|s| s.from_week <= weeks && weeks < s.to_week)
            .or_else(|| self.segments.last())
    }
}

const fn segment(from_week: f64, to_week: f64, rate_kg_per_week: f64) -> ReferenceSegment {
    ReferenceSegment { from_week, to_week, rate_kg_per_week }
}

const NOVICE_CAVEAT: &str = "Pooled averages from untrained adults in supervised training \
    studies. Individual rates vary widely and drop with training age, sleep and energy intake.";

pub const PROGRESSION_REFERENCES: &[ProgressionReference] = &[
    ProgressionReference {
        exercise_id: "back_squat",
        label: "Back squat, untrained adults (training-study average)",
        caveat: NOVICE_CAVEAT,
        segments: &[segment(0.0, 8.0, 2.5), segment(8.0, 24.0, 1.25), segment(24.0, 52.0, 0.5)],
    },
    ProgressionReference {
        exercise_id: "bench_press",
        label: "Bench press, untrained adults (training-study average)",
        caveat: NOVICE_CAVEAT,
        segments: &[segment(0.0, 8.0, 1.25), segment(8.0, 24.0, 0.6), segment(24.0, 52.0, 0.25)],
    },
    ProgressionReference {
        exercise_id: "romanian_deadlift",
        label: "Hip hinge, untrained adults (training-study average)",
        caveat: NOVICE_CAVEAT,
        segments: &[segment(0.0, 8.0, 2.0), segment(8.0, 24.0, 1.0), segment(24.0, 52.0, 0.4)],
    },
    ProgressionReference {
        exercise_id: "overhead_press",
        label: "Overhead press, untrained adults (training-study average)",
        caveat: NOVICE_CAVEAT,
        segments: &[segment(0.0, 8.0, 0.75), segment(8.0, 24.0, 0.4), segment(24.0, 52.0, 0.15)],
    },
];

pub fn find_reference(exercise_id: &str) -> Option<&'static ProgressionReference> {
    PROGRESSION_REFERENCES.iter().find(|r| r.exercise_id == exercise_id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionRateResult {
    pub exercise_id: String,
    /// Sessions in the series, reported even when there is not enough data
    pub session_count: usize,
    pub weeks_of_data: f64,
    pub has_enough_data: bool,
    pub actual_rate_kg_per_week: f64,
    pub reference_rate_kg_per_week: Option<f64>,
    pub reference_label: Option<&'static str>,
    pub reference_caveat: Option<&'static str>,
    /// R2 of the linear fit, only with enough data
    pub fit_r2: Option<f64>,
}

/// Ordinary least-squares slope. Returns 0.0 for fewer than two points or
/// when every x is identical.
pub fn linear_regression_slope(points: &[RegressionPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    let sum_xy: f64 = points.iter().map(|p| p.x * p.y).sum();
    let sum_xx: f64 = points.iter().map(|p| p.x * p.x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    if slope.is_finite() { slope } else { 0.0 }
}

/// Coefficient of determination of a linfa least-squares fit
fn fit_r2(points: &[RegressionPoint]) -> Option<f64> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let records = Array2::from_shape_vec((points.len(), 1), xs).ok()?;
    let targets = Array1::from_vec(points.iter().map(|p| p.y).collect::<Vec<_>>());
    let dataset = Dataset::new(records, targets);

    let model = LinearRegression::default().fit(&dataset).ok()?;
    let predictions = model.predict(&dataset);
    predictions
        .r2(&dataset)
        .ok()
        .filter(|r2| r2.is_finite())
}

/// One point per workout: the non-warmup set with the highest estimated 1RM.
///
/// Sets are scanned in logged order so the earliest set wins a tie. Output is
/// ordered by completion time.
pub fn select_best_sets(sets: &[TrendSet]) -> Vec<StrengthTrendPoint> {
    let mut working: Vec<&TrendSet> = sets.iter().filter(|s| !s.is_warmup).collect();
    working.sort_by_key(|s| s.logged_at);

    let mut points: Vec<StrengthTrendPoint> = Vec::new();
    let mut best: HashMap<i64, (usize, f64)> = HashMap::new();

    for set in working {
        let score = estimate_one_rep_max(set.load_kg, set.reps);
        match best.get_mut(&set.workout_id) {
            Some((idx, best_score)) => {
                if score > *best_score {
                    *best_score = score;
                    points[*idx].best_set_reps = set.reps;
                    points[*idx].best_set_load_kg = set.load_kg;
                }
            }
            None => {
                best.insert(set.workout_id, (points.len(), score));
                points.push(StrengthTrendPoint {
                    workout_id: set.workout_id,
                    exercise_id: set.exercise_id.clone(),
                    exercise_name: set.exercise_name.clone(),
                    completed_at: set.completed_at,
                    best_set_reps: set.reps,
                    best_set_load_kg: set.load_kg,
                });
            }
        }
    }

    points.sort_by_key(|p| (p.completed_at, p.workout_id));
    points
}

/// Weekly estimated-1RM trend for an exercise, compared against its reference
/// curve when one exists.
///
/// Needs at least four sessions spanning two weeks; below that the rate is
/// reported as 0.0 with `has_enough_data == false`.
pub fn calculate_progression_rate(
    exercise_id: &str,
    series: &[StrengthTrendPoint],
) -> ProgressionRateResult {
    let mut sorted: Vec<&StrengthTrendPoint> = series.iter().collect();
    sorted.sort_by_key(|p| p.completed_at);

    let session_count = sorted.len();
    let weeks_of_data = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => weeks_between(first.completed_at, last.completed_at),
        _ => 0.0,
    };

    let has_enough_data = session_count >= MIN_SESSIONS && weeks_of_data >= MIN_WEEKS;

    let (actual_rate_kg_per_week, r2) = match sorted.first() {
        Some(first) if has_enough_data => {
            let points: Vec<RegressionPoint> = sorted
                .iter()
                .map(|p| RegressionPoint {
                    x: weeks_between(first.completed_at, p.completed_at),
                    y: estimate_one_rep_max(p.best_set_load_kg, p.best_set_reps),
                })
                .collect();
            (linear_regression_slope(&points), fit_r2(&points))
        }
        _ => (0.0, None),
    };

    let reference = find_reference(exercise_id);
    let segment = reference.and_then(|r| r.segment_at(weeks_of_data));

    ProgressionRateResult {
        exercise_id: exercise_id.to_string(),
        session_count,
        weeks_of_data,
        has_enough_data,
        actual_rate_kg_per_week,
        reference_rate_kg_per_week: segment.map(|s| s.rate_kg_per_week),
        reference_label: reference.map(|r| r.label),
        reference_caveat: reference.map(|r| r.caveat),
        fit_r2: r2,
    }
}
