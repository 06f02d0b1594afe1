//! Single-row decoding: runs -> alignment -> unit width -> symbols -> card.

use crate::alignment::{locate_alignment, unit_width, CALIBRATION_RUNS};
use crate::classify::classify_codeword;
use crate::params::ScanParams;
use crate::runs::run_lengths;
use deckcode_codebook::{Codebook, Codeword, SYMBOLS_PER_CODEWORD};
use deckcode_core::Card;
use serde::Serialize;

/// Runs from the alignment start through the last black symbol run.
pub const CODEWORD_SPAN: usize = CALIBRATION_RUNS + 2 * SYMBOLS_PER_CODEWORD;

/// Decode stages, in order. Used to report where a row failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RowStage {
    Extracting,
    Aligning,
    Classifying,
    Resolving,
}

/// Why a row produced no card.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RowError {
    #[error("no calibration triple among {runs} runs")]
    NoAlignment { runs: usize },
    #[error("codeword needs {needed} runs, row has {available}")]
    InsufficientRuns { needed: usize, available: usize },
    #[error("codeword {codeword} is not in the codebook")]
    UnknownCodeword { codeword: Codeword },
}

impl RowError {
    /// Stage at which decoding stopped.
    pub fn stage(&self) -> RowStage {
        match self {
            RowError::NoAlignment { .. } => RowStage::Aligning,
            RowError::InsufficientRuns { .. } => RowStage::Classifying,
            RowError::UnknownCodeword { .. } => RowStage::Resolving,
        }
    }

    /// `true` for optical failures, `false` when a codeword was read but not recognised.
    pub fn is_unreadable(&self) -> bool {
        !matches!(self, RowError::UnknownCodeword { .. })
    }
}

/// The raw measurements behind one classified codeword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CodewordReading {
    /// Index of the calibration triple in the run sequence.
    pub start: usize,
    pub unit_width: usize,
    pub whites: [usize; SYMBOLS_PER_CODEWORD],
    pub blacks: [usize; SYMBOLS_PER_CODEWORD],
    pub codeword: Codeword,
}

/// Full record of one row's decode, for debugging and reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowTrace {
    pub runs: Vec<usize>,
    pub start: Option<usize>,
    pub reading: Option<CodewordReading>,
    pub outcome: Result<Card, RowError>,
}

/// Read the codeword following the first calibration triple in `runs`.
pub fn read_codeword(runs: &[usize], params: &ScanParams) -> Result<CodewordReading, RowError> {
    let start = locate_alignment(runs, params.variance)
        .ok_or(RowError::NoAlignment { runs: runs.len() })?;

    let needed = start + CODEWORD_SPAN;
    if runs.len() < needed {
        return Err(RowError::InsufficientRuns {
            needed,
            available: runs.len(),
        });
    }
    let span = &runs[start..needed];

    let unit_width = unit_width(span, 0).ok_or(RowError::InsufficientRuns {
        needed,
        available: runs.len(),
    })?;
    let whites = std::array::from_fn(|i| span[CALIBRATION_RUNS + 2 * i]);
    let blacks = std::array::from_fn(|i| span[CALIBRATION_RUNS + 2 * i + 1]);
    let codeword = classify_codeword(&whites, &blacks, unit_width, &params.thresholds);

    Ok(CodewordReading {
        start,
        unit_width,
        whites,
        blacks,
        codeword,
    })
}

/// Stateless per-row decoder over a shared codebook.
#[derive(Clone, Copy, Debug)]
pub struct RowDecoder<'a> {
    codebook: &'a Codebook,
    params: &'a ScanParams,
}

impl<'a> RowDecoder<'a> {
    pub fn new(codebook: &'a Codebook, params: &'a ScanParams) -> Self {
        Self { codebook, params }
    }

    /// Decode one row of pixels.
    pub fn decode(&self, row: &[u8]) -> Result<Card, RowError> {
        let runs = run_lengths(row, self.params.min_run_len);
        let reading = read_codeword(&runs, self.params)?;
        self.resolve(reading.codeword)
    }

    /// Decode one row, collapsing every failure to `None`.
    #[inline]
    pub fn observe(&self, row: &[u8]) -> Option<Card> {
        self.decode(row).ok()
    }

    /// Decode one row and keep every intermediate measurement.
    pub fn trace(&self, row: &[u8]) -> RowTrace {
        let runs = run_lengths(row, self.params.min_run_len);
        let start = locate_alignment(&runs, self.params.variance);
        match read_codeword(&runs, self.params) {
            Ok(reading) => RowTrace {
                outcome: self.resolve(reading.codeword),
                runs,
                start,
                reading: Some(reading),
            },
            Err(err) => RowTrace {
                runs,
                start,
                reading: None,
                outcome: Err(err),
            },
        }
    }

    fn resolve(&self, codeword: Codeword) -> Result<Card, RowError> {
        self.codebook
            .lookup(codeword)
            .ok_or(RowError::UnknownCodeword { codeword })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u8 = 255;
    const B: u8 = 0;

    fn row(spec: &[(u8, usize)]) -> Vec<u8> {
        spec.iter()
            .flat_map(|&(v, n)| std::iter::repeat_n(v, n))
            .collect()
    }

    /// Printed layout of "01 01 01 11" (2 of hearts) at unit 15, spacer 20.
    fn two_of_hearts_row() -> Vec<u8> {
        row(&[
            (W, 20),
            (B, 15),
            (W, 15),
            (B, 15),
            (W, 20),
            (W, 15),
            (B, 15),
            (W, 20),
            (W, 15),
            (B, 15),
            (W, 20),
            (W, 15),
            (B, 15),
            (W, 20),
            (B, 30),
            (W, 60),
        ])
    }

    #[test]
    fn decodes_printed_row() {
        let book = Codebook::generate().unwrap();
        let params = ScanParams::default();
        let decoder = RowDecoder::new(&book, &params);

        let card = decoder.decode(&two_of_hearts_row()).expect("decode");
        assert_eq!(card, Card::new(1, 0).unwrap());

        let trace = decoder.trace(&two_of_hearts_row());
        let reading = trace.reading.expect("reading");
        assert_eq!(trace.start, Some(0));
        assert_eq!(reading.unit_width, 15);
        assert_eq!(reading.whites, [35, 35, 35, 20]);
        assert_eq!(reading.blacks, [15, 15, 15, 30]);
        assert_eq!(reading.codeword.to_string(), "01 01 01 11");
        assert_eq!(trace.outcome, Ok(card));
    }

    #[test]
    fn blank_row_is_unreadable() {
        let book = Codebook::generate().unwrap();
        let params = ScanParams::default();
        let decoder = RowDecoder::new(&book, &params);

        let err = decoder.decode(&[W; 200]).unwrap_err();
        assert_eq!(err, RowError::NoAlignment { runs: 0 });
        assert_eq!(err.stage(), RowStage::Aligning);
        assert!(err.is_unreadable());
        assert_eq!(decoder.observe(&[W; 200]), None);
    }

    #[test]
    fn truncated_row_lacks_runs() {
        let book = Codebook::generate().unwrap();
        let params = ScanParams::default();
        let decoder = RowDecoder::new(&book, &params);

        let mut truncated = two_of_hearts_row();
        truncated.truncate(150);
        let err = decoder.decode(&truncated).unwrap_err();
        assert!(matches!(err, RowError::InsufficientRuns { needed: 11, .. }));
        assert_eq!(err.stage(), RowStage::Classifying);
    }

    #[test]
    fn unknown_codeword_is_reported() {
        // "01 01 01 10" is the rank code of the 2 without a suit offset; no card prints it.
        let book = Codebook::generate().unwrap();
        let params = ScanParams::default();
        let decoder = RowDecoder::new(&book, &params);
        assert_eq!(book.lookup_str("01 01 01 10"), None);

        let r = row(&[
            (W, 20),
            (B, 15),
            (W, 15),
            (B, 15),
            (W, 35),
            (B, 15),
            (W, 35),
            (B, 15),
            (W, 35),
            (B, 15),
            (W, 20),
            (B, 15),
            (W, 60),
        ]);
        let err = decoder.decode(&r).unwrap_err();
        assert_eq!(
            err,
            RowError::UnknownCodeword {
                codeword: "01 01 01 10".parse().unwrap()
            }
        );
        assert!(!err.is_unreadable());
        assert_eq!(err.stage(), RowStage::Resolving);
    }
}
