//! Weekly hypertrophy volume per muscle group
//!
//! Stage A turns logged sets into effective-set credit per muscle group.
//! Stage B rounds each total for display and assigns a volume zone from the
//! unrounded total.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exercises::{
    is_excluded_from_volume, metcon_discount, Category, MuscleGroup, MuscleMapping, MuscleRole,
    VolumeThresholds,
};

/// Self-reported effort of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Easy,
    Productive,
    Hard,
    Failure,
}

impl Effort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effort::Easy => "easy",
            Effort::Productive => "productive",
            Effort::Hard => "hard",
            Effort::Failure => "failure",
        }
    }
}

impl FromStr for Effort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Effort::Easy),
            "productive" => Ok(Effort::Productive),
            "hard" => Ok(Effort::Hard),
            "failure" => Ok(Effort::Failure),
            _ => Err(anyhow::anyhow!("unknown effort label: {s}")),
        }
    }
}

/// A logged set joined with its exercise and the exercise's muscle mappings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedSet {
    pub set_id: i64,
    pub exercise_id: String,
    pub exercise_name: String,
    pub category: Category,
    pub reps: u32,
    pub load_kg: f64,
    pub effort: Effort,
    pub is_warmup: bool,
    pub logged_at: DateTime<Utc>,
    pub mappings: Vec<MuscleMapping>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeZone {
    /// Below minimum effective volume
    Red,
    Yellow,
    Green,
    Amber,
    /// Above maximum recoverable volume
    Orange,
}

impl VolumeZone {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeZone::Red => "below MEV",
            VolumeZone::Yellow => "maintenance",
            VolumeZone::Green => "optimal",
            VolumeZone::Amber => "high",
            VolumeZone::Orange => "above MRV",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleVolumeResult {
    pub muscle_group: MuscleGroup,
    pub display_name: &'static str,
    /// Total rounded to the nearest 0.5, for display only
    pub effective_sets: f64,
    /// Unrounded total the zone was decided on
    pub raw_effective_sets: f64,
    pub zone: VolumeZone,
    pub thresholds: VolumeThresholds,
}

pub fn role_credit(role: MuscleRole) -> f64 {
    match role {
        MuscleRole::Direct => 1.0,
        MuscleRole::Indirect => 0.5,
    }
}

pub fn effort_multiplier(effort: Effort) -> f64 {
    match effort {
        Effort::Easy => 0.5,
        Effort::Productive | Effort::Hard | Effort::Failure => 1.0,
    }
}

/// Stage A: effective-set credit per muscle group.
///
/// Warmups and exercises excluded from volume contribute nothing. Every
/// mapping of a remaining set is credited independently.
pub fn accumulate_effective_sets(sets: &[LoggedSet]) -> HashMap<MuscleGroup, f64> {
    let mut totals: HashMap<MuscleGroup, f64> = HashMap::new();

    for set in sets {
        if set.is_warmup || is_excluded_from_volume(&set.exercise_id) {
            continue;
        }

        let set_credit = effort_multiplier(set.effort) * metcon_discount(&set.exercise_id);
        for mapping in &set.mappings {
            *totals.entry(mapping.muscle_group).or_insert(0.0) +=
                role_credit(mapping.role) * set_credit;
        }
    }

    totals
}

/// Round half up to the nearest 0.5
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0 + 0.5).floor() / 2.0
}

pub fn zone_for(raw_total: f64, thresholds: &VolumeThresholds) -> VolumeZone {
    if raw_total < thresholds.mev_low {
        VolumeZone::Red
    } else if raw_total < thresholds.optimal_low {
        VolumeZone::Yellow
    } else if raw_total <= thresholds.optimal_high {
        VolumeZone::Green
    } else if raw_total <= thresholds.mrv_high {
        VolumeZone::Amber
    } else {
        VolumeZone::Orange
    }
}

/// Stage B: one result per known muscle group, untrained groups included
pub fn classify_volume(totals: &HashMap<MuscleGroup, f64>) -> Vec<MuscleVolumeResult> {
    MuscleGroup::all()
        .iter()
        .map(|group| {
            let raw = totals.get(group).copied().unwrap_or(0.0);
            let thresholds = group.thresholds();
            MuscleVolumeResult {
                muscle_group: *group,
                display_name: group.display_name(),
                effective_sets: round_to_half(raw),
                raw_effective_sets: raw,
                zone: zone_for(raw, &thresholds),
                thresholds,
            }
        })
        .collect()
}

/// Stage A followed by stage B
pub fn calculate_volume(sets: &[LoggedSet]) -> Vec<MuscleVolumeResult> {
    classify_volume(&accumulate_effective_sets(sets))
}
