//! High-level facade crate for the `deckcode-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying crates
//! - (feature-gated) helpers that load an already cropped deck photo with the
//!   `image` crate, binarize it and run the deck scanner on it.
//!
//! ## Quickstart
//!
//! ```no_run
//! use deckcode::detect;
//! use deckcode::scan::ScanConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ScanConfig::new("deck.png");
//! let scan = detect::scan_path(&cfg)?;
//! println!("{} cards, score {:.1}", scan.deck.len(), scan.score());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `deckcode::core`: cards, deck strings, pixel containers, logger setup.
//! - `deckcode::codebook`: symbols, codewords and the card codebook.
//! - `deckcode::scan`: row decoding, consensus and scoring.
//! - `deckcode::print`: synthetic deck images.
//! - `deckcode::detect` (feature `image`): end-to-end helpers on `image::GrayImage`.

pub use deckcode_codebook as codebook;
pub use deckcode_core as core;
pub use deckcode_print as print;
pub use deckcode_scan as scan;

pub use deckcode_codebook::{Codebook, Codeword};
pub use deckcode_core::Card;
pub use deckcode_scan::{DeckScan, DeckScanner, ScanParams};

#[cfg(feature = "image")]
pub mod detect;
