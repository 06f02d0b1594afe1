//! Ternary symbol classification from white/black run widths.

use crate::params::SymbolThresholds;
use deckcode_codebook::{Codeword, Symbol, SYMBOLS_PER_CODEWORD};

/// Classify the four symbols following a calibration triple.
///
/// `whites[i]` is the white run in front of `blacks[i]`. The result only ever
/// contains `01`, `10` and `11`.
pub fn classify_symbols(
    whites: &[usize; SYMBOLS_PER_CODEWORD],
    blacks: &[usize; SYMBOLS_PER_CODEWORD],
    unit_width: usize,
    thresholds: &SymbolThresholds,
) -> [Symbol; SYMBOLS_PER_CODEWORD] {
    let w = unit_width as f64;
    let long_black = w * thresholds.long_black;
    let wide_white = w * thresholds.wide_white;
    let extra_wide_white = w * thresholds.extra_wide_white;

    let mut symbols = [Symbol::Left; SYMBOLS_PER_CODEWORD];
    for i in 0..SYMBOLS_PER_CODEWORD {
        let white = whites[i] as f64;
        let black = blacks[i] as f64;
        symbols[i] = if black >= long_black {
            Symbol::Full
        } else if i == 0 {
            if white > wide_white {
                Symbol::Right
            } else {
                Symbol::Left
            }
        } else if symbols[i - 1] != Symbol::Left && white > wide_white {
            // Previous symbol ended in ink, so the whole gap is spacer + empty cell.
            Symbol::Right
        } else if white > extra_wide_white {
            Symbol::Right
        } else {
            Symbol::Left
        };
    }
    symbols
}

/// Same as [`classify_symbols`], packed into a [`Codeword`].
pub fn classify_codeword(
    whites: &[usize; SYMBOLS_PER_CODEWORD],
    blacks: &[usize; SYMBOLS_PER_CODEWORD],
    unit_width: usize,
    thresholds: &SymbolThresholds,
) -> Codeword {
    Codeword::from_symbols(classify_symbols(whites, blacks, unit_width, thresholds))
}
