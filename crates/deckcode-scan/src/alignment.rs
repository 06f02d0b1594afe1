//! Calibration triple search and unit width estimate.

/// Runs in the calibration triple (black, white, black).
pub const CALIBRATION_RUNS: usize = 3;

/// Index of the first window `[a, b, c]` with both `a` and `c` within
/// `variance` pixels of the middle run `b`.
pub fn locate_alignment(runs: &[usize], variance: usize) -> Option<usize> {
    runs.windows(CALIBRATION_RUNS).position(|w| {
        let (a, b, c) = (w[0], w[1], w[2]);
        a.abs_diff(b) <= variance && c.abs_diff(b) <= variance
    })
}

/// Unit cell width: the rounded mean of the calibration triple at `start`.
///
/// Returns `None` if the triple runs past the end of `runs`.
pub fn unit_width(runs: &[usize], start: usize) -> Option<usize> {
    let triple = runs.get(start..start + CALIBRATION_RUNS)?;
    let sum: usize = triple.iter().sum();
    Some((sum as f64 / CALIBRATION_RUNS as f64).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_matching_window() {
        assert_eq!(locate_alignment(&[50, 49, 51, 10, 80], 6), Some(0));
        assert_eq!(locate_alignment(&[90, 15, 14, 16, 15, 15], 6), Some(1));
    }

    #[test]
    fn outer_runs_are_compared_to_the_middle_only() {
        // 10 and 22 are 12 apart, but each is within 6 of 16.
        assert_eq!(locate_alignment(&[10, 16, 22], 6), Some(0));
        assert_eq!(locate_alignment(&[10, 17, 12], 6), None);
    }

    #[test]
    fn short_or_irregular_runs_have_no_alignment() {
        assert_eq!(locate_alignment(&[], 6), None);
        assert_eq!(locate_alignment(&[15, 15], 6), None);
        assert_eq!(locate_alignment(&[5, 40, 5, 60, 3], 6), None);
    }

    #[test]
    fn unit_width_rounds_the_mean() {
        assert_eq!(unit_width(&[15, 15, 16], 0), Some(15));
        assert_eq!(unit_width(&[9, 15, 16, 16], 1), Some(16));
        assert_eq!(unit_width(&[15, 15], 0), None);
    }
}
