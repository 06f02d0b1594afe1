use crate::aggregate::aggregate_deck;
use crate::params::ScanParams;
use crate::row::{RowDecoder, RowError, RowTrace};
use crate::score::accuracy_score;
use deckcode_codebook::Codebook;
use deckcode_core::{Card, GrayImageView};
use serde::Serialize;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Per-image decode counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RowStats {
    pub rows: usize,
    pub decoded: usize,
    pub no_alignment: usize,
    pub insufficient_runs: usize,
    pub unknown_codeword: usize,
}

impl RowStats {
    fn record(&mut self, outcome: &Result<Card, RowError>) {
        self.rows += 1;
        match outcome {
            Ok(_) => self.decoded += 1,
            Err(RowError::NoAlignment { .. }) => self.no_alignment += 1,
            Err(RowError::InsufficientRuns { .. }) => self.insufficient_runs += 1,
            Err(RowError::UnknownCodeword { .. }) => self.unknown_codeword += 1,
        }
    }

    /// Rows that produced no card, for any reason.
    pub fn failed(&self) -> usize {
        self.rows - self.decoded
    }
}

/// Result of scanning one image.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckScan {
    /// One entry per image row, in row order.
    pub observations: Vec<Option<Card>>,
    /// Consensus deck.
    pub deck: Vec<Card>,
    pub stats: RowStats,
}

impl DeckScan {
    /// Accuracy of `deck` against the canonical order, in percent.
    pub fn score(&self) -> f64 {
        accuracy_score(&self.deck)
    }
}

/// Decodes whole images into decks using a frozen codebook.
#[derive(Clone, Debug)]
pub struct DeckScanner {
    codebook: Codebook,
    params: ScanParams,
}

impl DeckScanner {
    pub fn new(codebook: Codebook, params: ScanParams) -> Self {
        Self { codebook, params }
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn params(&self) -> &ScanParams {
        &self.params
    }

    fn row_decoder(&self) -> RowDecoder<'_> {
        RowDecoder::new(&self.codebook, &self.params)
    }

    /// Decode one row; `None` if it is unreadable or its codeword is unknown.
    pub fn decode_row(&self, row: &[u8]) -> Option<Card> {
        self.row_decoder().observe(row)
    }

    /// Decode one row and report why it failed.
    pub fn try_decode_row(&self, row: &[u8]) -> Result<Card, RowError> {
        self.row_decoder().decode(row)
    }

    /// Decode one row and keep every intermediate measurement.
    pub fn trace_row(&self, row: &[u8]) -> RowTrace {
        self.row_decoder().trace(row)
    }

    fn row_outcomes(&self, img: &GrayImageView<'_>) -> Vec<Result<Card, RowError>> {
        if img.width == 0 {
            return vec![Err(RowError::NoAlignment { runs: 0 }); img.height];
        }
        let decoder = self.row_decoder();

        #[cfg(feature = "rayon")]
        let outcomes: Vec<_> = img
            .data
            .par_chunks_exact(img.width)
            .map(|row| decoder.decode(row))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let outcomes: Vec<_> = img
            .data
            .chunks_exact(img.width)
            .map(|row| decoder.decode(row))
            .collect();

        outcomes
    }

    /// Per-row observations, in row order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width, height = img.height))
    )]
    pub fn observe(&self, img: &GrayImageView<'_>) -> Vec<Option<Card>> {
        self.row_outcomes(img)
            .into_iter()
            .map(Result::ok)
            .collect()
    }

    /// Decode every row, then build the consensus deck.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width, height = img.height))
    )]
    pub fn scan(&self, img: &GrayImageView<'_>) -> DeckScan {
        let outcomes = self.row_outcomes(img);

        let mut stats = RowStats::default();
        let mut observations = Vec::with_capacity(outcomes.len());
        for (y, outcome) in outcomes.into_iter().enumerate() {
            stats.record(&outcome);
            match outcome {
                Ok(card) => observations.push(Some(card)),
                Err(err) => {
                    log::trace!("row {y}: {err}");
                    observations.push(None);
                }
            }
        }

        let deck = aggregate_deck(&observations, &self.params.consensus);
        log::debug!(
            "scanned {} rows: decoded={} no_alignment={} insufficient_runs={} unknown_codeword={} deck={}",
            stats.rows,
            stats.decoded,
            stats.no_alignment,
            stats.insufficient_runs,
            stats.unknown_codeword,
            deck.len()
        );

        DeckScan {
            observations,
            deck,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckcode_core::GrayImage;

    const W: u8 = 255;
    const B: u8 = 0;

    fn row(spec: &[(u8, usize)]) -> Vec<u8> {
        spec.iter()
            .flat_map(|&(v, n)| std::iter::repeat_n(v, n))
            .collect()
    }

    // "01 01 10 11" (4 of hearts), unit 15, spacer 20, padded to 300 px.
    fn four_of_hearts_row() -> Vec<u8> {
        let mut r = row(&[
            (W, 20),
            (B, 15),
            (W, 15),
            (B, 15),
            (W, 35),
            (B, 15),
            (W, 35),
            (B, 15),
            (W, 20),
            (B, 15),
            (W, 35),
            (B, 30),
        ]);
        r.resize(300, W);
        r
    }

    fn image(rows: &[Vec<u8>]) -> GrayImage {
        let width = rows[0].len();
        let data = rows.concat();
        GrayImage::new(width, rows.len(), data).unwrap()
    }

    #[test]
    fn scan_counts_failures_and_builds_deck() {
        let scanner = DeckScanner::new(Codebook::generate().unwrap(), ScanParams::default());
        let card = four_of_hearts_row();
        let blank = vec![W; 300];
        let img = image(&[blank.clone(), card.clone(), card.clone(), blank, card]);

        let scan = scanner.scan(&img.view());
        let four = Card::new(3, 0).unwrap();
        assert_eq!(
            scan.observations,
            vec![None, Some(four), Some(four), None, Some(four)]
        );
        assert_eq!(scan.deck, vec![four]);
        assert_eq!(scan.stats.rows, 5);
        assert_eq!(scan.stats.decoded, 3);
        assert_eq!(scan.stats.no_alignment, 2);
        assert_eq!(scan.stats.failed(), 2);
        assert_eq!(scanner.observe(&img.view()), scan.observations);
    }

    #[test]
    fn row_api_matches_scan() {
        let scanner = DeckScanner::new(Codebook::generate().unwrap(), ScanParams::default());
        let r = four_of_hearts_row();
        assert_eq!(scanner.decode_row(&r), Some(Card::new(3, 0).unwrap()));
        assert_eq!(scanner.try_decode_row(&r), Ok(Card::new(3, 0).unwrap()));
        let trace = scanner.trace_row(&r);
        assert_eq!(
            trace.reading.map(|reading| reading.codeword.to_string()),
            Some("01 01 10 11".to_string())
        );
    }

    #[test]
    fn degenerate_images_give_empty_deck() {
        let scanner = DeckScanner::new(Codebook::generate().unwrap(), ScanParams::default());

        let empty = GrayImage::new(0, 0, Vec::new()).unwrap();
        let scan = scanner.scan(&empty.view());
        assert!(scan.deck.is_empty());
        assert_eq!(scan.stats.rows, 0);

        let narrow = GrayImage::new(0, 4, Vec::new()).unwrap();
        let scan = scanner.scan(&narrow.view());
        assert_eq!(scan.observations, vec![None; 4]);
        assert_eq!(scan.stats.no_alignment, 4);

        let white = GrayImage::filled(120, 10, W);
        let scan = scanner.scan(&white.view());
        assert!(scan.deck.is_empty());
        assert_eq!(scan.score(), 0.0);
    }
}
