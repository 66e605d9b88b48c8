//! Exercise catalog - muscle groups, volume thresholds and exercise mappings

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Muscle groups tracked for weekly volume
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    FrontDelts,
    SideDelts,
    RearDelts,
    Biceps,
    Triceps,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Abs,
}

/// Weekly effective-set thresholds for one muscle group.
///
/// Seeded values must stay non-decreasing:
/// `mev_low <= mev_high <= optimal_low <= optimal_high <= mrv_low <= mrv_high`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VolumeThresholds {
    pub mev_low: f64,
    pub mev_high: f64,
    pub optimal_low: f64,
    pub optimal_high: f64,
    pub mrv_low: f64,
    pub mrv_high: f64,
}

impl VolumeThresholds {
    const fn new(
        mev_low: f64,
        mev_high: f64,
        optimal_low: f64,
        optimal_high: f64,
        mrv_low: f64,
        mrv_high: f64,
    ) -> Self {
        Self { mev_low, mev_high, optimal_low, optimal_high, mrv_low, mrv_high }
    }

    /// True when the ordering invariant holds
    pub fn is_ordered(&self) -> bool {
        self.mev_low <= self.mev_high
            && self.mev_high <= self.optimal_low
            && self.optimal_low <= self.optimal_high
            && self.optimal_high <= self.mrv_low
            && self.mrv_low <= self.mrv_high
    }
}

impl MuscleGroup {
    pub fn id(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::FrontDelts => "front_delts",
            MuscleGroup::SideDelts => "side_delts",
            MuscleGroup::RearDelts => "rear_delts",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Quads => "quads",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Calves => "calves",
            MuscleGroup::Abs => "abs",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::FrontDelts => "Front Delts",
            MuscleGroup::SideDelts => "Side Delts",
            MuscleGroup::RearDelts => "Rear Delts",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Abs => "Abs",
        }
    }

    /// Standard weekly thresholds for this group
    pub fn thresholds(&self) -> VolumeThresholds {
        match self {
            MuscleGroup::Chest => VolumeThresholds::new(4.0, 6.0, 6.0, 10.0, 12.0, 16.0),
            MuscleGroup::Back => VolumeThresholds::new(4.0, 6.0, 6.0, 10.0, 12.0, 18.0),
            MuscleGroup::FrontDelts => VolumeThresholds::new(1.0, 2.0, 2.0, 6.0, 8.0, 12.0),
            MuscleGroup::SideDelts => VolumeThresholds::new(2.0, 4.0, 4.0, 8.0, 10.0, 14.0),
            MuscleGroup::RearDelts => VolumeThresholds::new(1.0, 2.0, 2.0, 6.0, 8.0, 12.0),
            MuscleGroup::Biceps => VolumeThresholds::new(2.0, 4.0, 4.0, 8.0, 10.0, 14.0),
            MuscleGroup::Triceps => VolumeThresholds::new(2.0, 4.0, 4.0, 8.0, 10.0, 14.0),
            MuscleGroup::Quads => VolumeThresholds::new(4.0, 6.0, 6.0, 10.0, 12.0, 16.0),
            MuscleGroup::Hamstrings => VolumeThresholds::new(3.0, 4.0, 4.0, 8.0, 10.0, 14.0),
            MuscleGroup::Glutes => VolumeThresholds::new(2.0, 4.0, 4.0, 8.0, 10.0, 14.0),
            MuscleGroup::Calves => VolumeThresholds::new(2.0, 4.0, 4.0, 8.0, 10.0, 14.0),
            MuscleGroup::Abs => VolumeThresholds::new(1.0, 2.0, 2.0, 6.0, 8.0, 12.0),
        }
    }

    /// All muscle groups for iteration
    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::FrontDelts,
            MuscleGroup::SideDelts,
            MuscleGroup::RearDelts,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps,
            MuscleGroup::Quads,
            MuscleGroup::Hamstrings,
            MuscleGroup::Glutes,
            MuscleGroup::Calves,
            MuscleGroup::Abs,
        ]
    }
}

impl FromStr for MuscleGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        MuscleGroup::all()
            .iter()
            .find(|g| g.id() == id)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("unknown muscle group: {s}"))
    }
}

/// Whether an exercise primarily or secondarily loads a muscle group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MuscleRole {
    Direct,
    Indirect,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MuscleMapping {
    pub muscle_group: MuscleGroup,
    pub role: MuscleRole,
}

const fn direct(muscle_group: MuscleGroup) -> MuscleMapping {
    MuscleMapping { muscle_group, role: MuscleRole::Direct }
}

const fn indirect(muscle_group: MuscleGroup) -> MuscleMapping {
    MuscleMapping { muscle_group, role: MuscleRole::Indirect }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Compound,
    Isolation,
    Metcon,
    Mobility,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Compound => "compound",
            Category::Isolation => "isolation",
            Category::Metcon => "metcon",
            Category::Mobility => "mobility",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub mappings: &'static [MuscleMapping],
    /// Program rep range (low, high) for working sets
    pub rep_range: (u32, u32),
}

use MuscleGroup::*;

pub const EXERCISES: &[Exercise] = &[
    // Lower body
    Exercise {
        id: "back_squat",
        name: "Back Squat",
        category: Category::Compound,
        mappings: &[direct(Quads), direct(Glutes), indirect(Hamstrings)],
        rep_range: (5, 8),
    },
    Exercise {
        id: "romanian_deadlift",
        name: "Romanian Deadlift",
        category: Category::Compound,
        mappings: &[direct(Hamstrings), direct(Glutes), indirect(Back)],
        rep_range: (6, 10),
    },
    Exercise {
        id: "leg_press",
        name: "Leg Press",
        category: Category::Compound,
        mappings: &[direct(Quads), indirect(Glutes)],
        rep_range: (10, 15),
    },
    Exercise {
        id: "hip_thrust",
        name: "Hip Thrust",
        category: Category::Compound,
        mappings: &[direct(Glutes), indirect(Hamstrings)],
        rep_range: (8, 12),
    },
    Exercise {
        id: "leg_curl",
        name: "Leg Curl",
        category: Category::Isolation,
        mappings: &[direct(Hamstrings)],
        rep_range: (10, 15),
    },
    Exercise {
        id: "calf_raise",
        name: "Calf Raise",
        category: Category::Isolation,
        mappings: &[direct(Calves)],
        rep_range: (10, 15),
    },
    // Upper body
    Exercise {
        id: "bench_press",
        name: "Bench Press",
        category: Category::Compound,
        mappings: &[direct(Chest), indirect(Triceps), indirect(FrontDelts)],
        rep_range: (6, 10),
    },
    Exercise {
        id: "incline_dumbbell_press",
        name: "Incline Dumbbell Press",
        category: Category::Compound,
        mappings: &[direct(Chest), indirect(FrontDelts), indirect(Triceps)],
        rep_range: (8, 12),
    },
    Exercise {
        id: "overhead_press",
        name: "Overhead Press",
        category: Category::Compound,
        mappings: &[direct(FrontDelts), indirect(Triceps), indirect(SideDelts)],
        rep_range: (6, 10),
    },
    Exercise {
        id: "barbell_row",
        name: "Barbell Row",
        category: Category::Compound,
        mappings: &[direct(Back), indirect(Biceps), indirect(RearDelts)],
        rep_range: (8, 12),
    },
    Exercise {
        id: "pull_up",
        name: "Pull-up",
        category: Category::Compound,
        mappings: &[direct(Back), indirect(Biceps)],
        rep_range: (6, 10),
    },
    Exercise {
        id: "lateral_raise",
        name: "Lateral Raise",
        category: Category::Isolation,
        mappings: &[direct(SideDelts)],
        rep_range: (12, 20),
    },
    Exercise {
        id: "face_pull",
        name: "Face Pull",
        category: Category::Isolation,
        mappings: &[direct(RearDelts)],
        rep_range: (12, 20),
    },
    Exercise {
        id: "biceps_curl",
        name: "Biceps Curl",
        category: Category::Isolation,
        mappings: &[direct(Biceps)],
        rep_range: (10, 15),
    },
    Exercise {
        id: "triceps_pushdown",
        name: "Triceps Pushdown",
        category: Category::Isolation,
        mappings: &[direct(Triceps)],
        rep_range: (10, 15),
    },
    Exercise {
        id: "hanging_leg_raise",
        name: "Hanging Leg Raise",
        category: Category::Isolation,
        mappings: &[direct(Abs)],
        rep_range: (10, 15),
    },
    // Conditioning
    Exercise {
        id: "broad_jump",
        name: "Broad Jump",
        category: Category::Metcon,
        mappings: &[direct(Quads), direct(Glutes)],
        rep_range: (3, 5),
    },
    Exercise {
        id: "farmer_carry",
        name: "Farmer Carry",
        category: Category::Metcon,
        mappings: &[indirect(Back), indirect(Abs)],
        rep_range: (1, 3),
    },
    Exercise {
        id: "kettlebell_swing",
        name: "Kettlebell Swing",
        category: Category::Metcon,
        mappings: &[direct(Glutes), indirect(Hamstrings)],
        rep_range: (15, 20),
    },
    // Mobility holds
    Exercise {
        id: "dead_hang",
        name: "Dead Hang",
        category: Category::Mobility,
        mappings: &[indirect(Back)],
        rep_range: (1, 3),
    },
    Exercise {
        id: "couch_stretch",
        name: "Couch Stretch",
        category: Category::Mobility,
        mappings: &[indirect(Quads)],
        rep_range: (1, 3),
    },
];

/// Hypertrophy credit multipliers for conditioning-style movements
const METCON_DISCOUNTS: &[(&str, f64)] = &[
    ("broad_jump", 0.5),
    ("farmer_carry", 0.5),
    ("kettlebell_swing", 0.6),
];

/// Exercises that never count toward hypertrophy volume
const EXCLUDED_FROM_VOLUME: &[&str] = &["dead_hang", "couch_stretch"];

/// Rep range used when an exercise has no program entry
pub const DEFAULT_REP_RANGE: (u32, u32) = (8, 12);

const LOWER_BODY_GROUPS: &[MuscleGroup] = &[Quads, Hamstrings, Glutes];

pub fn get_all_exercises() -> &'static [Exercise] {
    EXERCISES
}

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

/// Muscle mappings for an exercise; empty for unknown ids
pub fn mappings_for(id: &str) -> &'static [MuscleMapping] {
    find_exercise(id).map_or(&[], |e| e.mappings)
}

/// Credit multiplier for an exercise, 1.0 when no discount is configured
pub fn metcon_discount(id: &str) -> f64 {
    METCON_DISCOUNTS
        .iter()
        .find(|(ex, _)| *ex == id)
        .map_or(1.0, |(_, discount)| *discount)
}

pub fn is_excluded_from_volume(id: &str) -> bool {
    EXCLUDED_FROM_VOLUME.contains(&id)
}

/// Lower body = any direct mapping to quads, hamstrings or glutes.
/// Unknown exercises count as upper body.
pub fn is_lower_body(id: &str) -> bool {
    mappings_for(id)
        .iter()
        .any(|m| m.role == MuscleRole::Direct && LOWER_BODY_GROUPS.contains(&m.muscle_group))
}

pub fn default_rep_range(id: &str) -> (u32, u32) {
    find_exercise(id).map_or(DEFAULT_REP_RANGE, |e| e.rep_range)
}
