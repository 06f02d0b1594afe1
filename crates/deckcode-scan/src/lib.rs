//! Codeword recognition and deck consensus for edge-coded playing cards.
//!
//! The input is a binary image (`0` ink, `255` paper) whose rows run across
//! the printed edge codes of a stack of cards. Each row is decoded on its own:
//! - run-length extraction with noise cleanup ([`run_lengths`]),
//! - calibration triple search and unit width ([`locate_alignment`], [`unit_width`]),
//! - symbol classification ([`classify_symbols`]),
//! - codebook lookup ([`RowDecoder`]).
//!
//! [`DeckScanner`] runs the row decoder over a whole image (in parallel with
//! the `rayon` feature), then [`aggregate_deck`] keeps cards seen on enough
//! consecutive rows. [`accuracy_score`] compares a deck with the canonical order.
//!
//! It does **not** crop, deskew or binarize camera frames.

mod aggregate;
mod alignment;
mod classify;
pub mod io;
mod params;
mod row;
mod runs;
mod scanner;
mod score;

pub use aggregate::{aggregate_deck, card_blocks, CardBlock};
pub use alignment::{locate_alignment, unit_width, CALIBRATION_RUNS};
pub use classify::{classify_codeword, classify_symbols};
pub use io::{RowFailures, ScanConfig, ScanIoError, ScanReport};
pub use params::{ConsensusParams, ScanParams, SymbolThresholds};
pub use row::{
    read_codeword, CodewordReading, RowDecoder, RowError, RowStage, RowTrace, CODEWORD_SPAN,
};
pub use runs::{extract_runs, run_lengths, Run};
pub use scanner::{DeckScan, DeckScanner, RowStats};
pub use score::{accuracy_score, SCORE_WINDOW};
