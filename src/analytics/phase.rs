//! Training phase by weeks since the first workout

use serde::{Deserialize, Serialize};

const TRANSITION_START_WEEKS: f64 = 3.0;
const HYPERTROPHIC_START_WEEKS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Strength gains driven mostly by neural adaptation
    Neural,
    Transition,
    /// Muscle growth becomes the main contributor
    Hypertrophic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseInfo {
    pub phase: TrainingPhase,
    pub title: &'static str,
    pub description: &'static str,
    pub citation: &'static str,
}

const CITATION: &str = "Moritani T, deVries HA (1979). Neural factors versus hypertrophy in the \
    time course of muscle strength gain. Am J Phys Med 58(3):115-130.";

impl TrainingPhase {
    pub fn info(&self) -> PhaseInfo {
        match self {
            TrainingPhase::Neural => PhaseInfo {
                phase: *self,
                title: "Neural adaptation",
                description: "Early strength gains come from better motor unit recruitment and \
                    coordination. Expect fast load increases with little visible size change.",
                citation: CITATION,
            },
            TrainingPhase::Transition => PhaseInfo {
                phase: *self,
                title: "Transition",
                description: "Neural gains are slowing while muscle protein accretion starts to \
                    show. Volume consistency matters more from here on.",
                citation: CITATION,
            },
            TrainingPhase::Hypertrophic => PhaseInfo {
                phase: *self,
                title: "Hypertrophic",
                description: "Further strength mostly follows muscle growth. Progress is slower \
                    and weekly volume in the optimal zone drives it.",
                citation: CITATION,
            },
        }
    }
}

/// Phase for elapsed training weeks: `< 3` neural, `[3, 8)` transition, `>= 8`
/// hypertrophic. Negative or non-finite input counts as neural.
pub fn classify_training_phase(weeks_training: f64) -> PhaseInfo {
    let phase = if !(weeks_training >= TRANSITION_START_WEEKS) {
        TrainingPhase::Neural
    } else if weeks_training < HYPERTROPHIC_START_WEEKS {
        TrainingPhase::Transition
    } else {
        TrainingPhase::Hypertrophic
    };

    phase.info()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify_training_phase(0.0).phase, TrainingPhase::Neural);
        assert_eq!(classify_training_phase(2.99).phase, TrainingPhase::Neural);
        assert_eq!(classify_training_phase(3.0).phase, TrainingPhase::Transition);
        assert_eq!(classify_training_phase(7.99).phase, TrainingPhase::Transition);
        assert_eq!(classify_training_phase(8.0).phase, TrainingPhase::Hypertrophic);
        assert_eq!(classify_training_phase(104.0).phase, TrainingPhase::Hypertrophic);
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(classify_training_phase(-1.0).phase, TrainingPhase::Neural);
        assert_eq!(classify_training_phase(f64::NAN).phase, TrainingPhase::Neural);
    }

    #[test]
    fn test_metadata_present() {
        for weeks in [1.0, 5.0, 10.0] {
            let info = classify_training_phase(weeks);
            assert!(!info.title.is_empty());
            assert!(!info.description.is_empty());
            assert!(info.citation.contains("1979"));
        }
    }
}
