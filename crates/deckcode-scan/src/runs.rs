//! Run-length extraction from one scanline.

use deckcode_core::is_white;

/// A maximal stretch of same-coloured pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub white: bool,
    pub len: usize,
}

/// Turn a row into the cleaned run sequence the codeword reader works on.
///
/// 1. Runs shorter than `min_run_len` are dropped as noise.
/// 2. Surviving neighbours of the same colour (split by a dropped run) are
///    merged; the merge gives back one pixel for the dropped run.
/// 3. A leading white run is dropped, so the sequence starts on ink.
pub fn extract_runs(row: &[u8], min_run_len: usize) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::new();
    for chunk in row.chunk_by(|a, b| is_white(*a) == is_white(*b)) {
        let run = Run {
            white: is_white(chunk[0]),
            len: chunk.len(),
        };
        if run.len < min_run_len {
            continue;
        }
        match merged.last_mut() {
            Some(prev) if prev.white == run.white => prev.len += run.len + 1,
            _ => merged.push(run),
        }
    }

    if merged.first().is_some_and(|r| r.white) {
        merged.remove(0);
    }
    merged
}

/// Lengths only, as consumed by alignment and classification.
pub fn run_lengths(row: &[u8], min_run_len: usize) -> Vec<usize> {
    extract_runs(row, min_run_len)
        .into_iter()
        .map(|r| r.len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(spec: &[(u8, usize)]) -> Vec<u8> {
        spec.iter()
            .flat_map(|&(v, n)| std::iter::repeat_n(v, n))
            .collect()
    }

    #[test]
    fn all_white_row_has_no_runs() {
        assert!(run_lengths(&[255; 40], 2).is_empty());
        assert!(run_lengths(&[], 2).is_empty());
    }

    #[test]
    fn single_pixel_noise_is_dropped_and_neighbours_merge() {
        let r = row(&[(255, 3), (0, 4), (255, 1), (0, 5), (255, 6)]);
        assert_eq!(run_lengths(&r, 2), vec![10, 6]);
    }

    #[test]
    fn leading_white_is_dropped_after_cleanup() {
        // The 1-pixel black run goes first, which exposes a leading white run.
        let r = row(&[(0, 1), (255, 2), (0, 3), (255, 4)]);
        assert_eq!(run_lengths(&r, 2), vec![3, 4]);

        let r = row(&[(0, 3), (255, 2)]);
        assert_eq!(
            extract_runs(&r, 2),
            vec![Run { white: false, len: 3 }, Run { white: true, len: 2 }]
        );
    }

    #[test]
    fn grey_levels_split_at_mid_range() {
        let r = [10, 20, 30, 200, 250, 255, 0, 0];
        assert_eq!(run_lengths(&r, 2), vec![3, 3, 2]);
    }
}
