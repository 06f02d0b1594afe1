//! Codeword catalog for edge-coded playing cards.
//!
//! This crate focuses on:
//! - the printed symbol alphabet and the four-symbol [`Codeword`],
//! - generating each card's codeword from a rank sub-code and a suit sub-code,
//! - the collision-checked [`Codebook`] used to turn scanned codewords into cards.
//!
//! It does **not** read pixels. Scanning lives in `deckcode-scan`.

mod codebook;
mod codeword;
mod generate;
mod symbol;

pub use codebook::{Codebook, CodebookEntry, CodebookError, CodebookIoError};
pub use codeword::{Codeword, CodewordParseError, SYMBOLS_PER_CODEWORD};
pub use generate::{card_code, combine, rank_code, suit_code};
pub use symbol::{Symbol, SymbolParseError};
