//! Estimated one-rep max (Epley)

/// Estimates a one-rep max from a single set: `load * (1 + reps / 30)`.
///
/// Returns `0.0` for negative load, zero reps or non-finite input. A `0.0`
/// result therefore means either "no estimate" or a genuinely unloaded set;
/// callers that need to tell those apart must check the inputs themselves.
pub fn estimate_one_rep_max(load_kg: f64, reps: u32) -> f64 {
    if !load_kg.is_finite() || load_kg < 0.0 || reps == 0 {
        return 0.0;
    }

    load_kg * (1.0 + f64::from(reps) / 30.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epley() {
        let e1rm = estimate_one_rep_max(100.0, 5);
        assert!((e1rm - 116.666_666).abs() < 1e-3, "e1rm: {}", e1rm);
    }

    #[test]
    fn test_single_rep_is_above_load() {
        // Epley does not special-case singles
        let e1rm = estimate_one_rep_max(100.0, 1);
        assert!((e1rm - 103.333_333).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_inputs_return_zero() {
        assert_eq!(estimate_one_rep_max(-10.0, 5), 0.0);
        assert_eq!(estimate_one_rep_max(100.0, 0), 0.0);
        assert_eq!(estimate_one_rep_max(f64::NAN, 5), 0.0);
        assert_eq!(estimate_one_rep_max(f64::INFINITY, 5), 0.0);
        assert_eq!(estimate_one_rep_max(f64::NEG_INFINITY, 5), 0.0);
    }

    #[test]
    fn test_never_below_load() {
        for load in [0.0, 2.5, 20.0, 61.25, 140.0, 315.5] {
            for reps in 1..=30 {
                assert!(estimate_one_rep_max(load, reps) >= load, "{load} x {reps}");
            }
        }
    }

    #[test]
    fn test_zero_load() {
        assert_eq!(estimate_one_rep_max(0.0, 10), 0.0);
    }
}
