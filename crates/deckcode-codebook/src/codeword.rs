//! Four-symbol codewords and their text form.

use crate::symbol::{Symbol, SymbolParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbols per codeword.
pub const SYMBOLS_PER_CODEWORD: usize = 4;

/// One card marking: four [`Symbol`]s in print order (left to right).
///
/// Stored packed into a byte, most significant bit first: the first printed
/// cell is bit 7 and the last printed cell is bit 0. The text form is the four
/// symbols separated by single spaces, e.g. `"01 10 11 01"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Codeword(u8);

/// Errors returned when parsing the text form of a [`Codeword`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodewordParseError {
    #[error("expected 4 symbols, found {0}")]
    SymbolCount(usize),
    #[error(transparent)]
    Symbol(#[from] SymbolParseError),
}

impl Codeword {
    #[inline]
    pub const fn from_packed(bits: u8) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn packed(self) -> u8 {
        self.0
    }

    pub fn from_symbols(symbols: [Symbol; SYMBOLS_PER_CODEWORD]) -> Self {
        let packed = symbols
            .iter()
            .fold(0u8, |acc, sym| (acc << 2) | sym.bits());
        Self(packed)
    }

    /// Symbol `i` in print order.
    #[inline]
    pub fn symbol(self, i: usize) -> Symbol {
        debug_assert!(i < SYMBOLS_PER_CODEWORD);
        Symbol::from_bits(self.0 >> (6 - 2 * i))
    }

    pub fn symbols(self) -> [Symbol; SYMBOLS_PER_CODEWORD] {
        std::array::from_fn(|i| self.symbol(i))
    }

    /// The eight printed cells left to right, `1` = black.
    pub fn cells(self) -> [u8; 8] {
        std::array::from_fn(|i| (self.0 >> (7 - i)) & 1)
    }

    /// `true` if every symbol leaves ink, so a scanline can recover the codeword.
    pub fn is_printable(self) -> bool {
        self.symbols().iter().all(|s| s.is_inked())
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sym) in self.symbols().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(sym.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for Codeword {
    type Err = CodewordParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != SYMBOLS_PER_CODEWORD {
            return Err(CodewordParseError::SymbolCount(tokens.len()));
        }
        let mut symbols = [Symbol::Blank; SYMBOLS_PER_CODEWORD];
        for (slot, token) in symbols.iter_mut().zip(&tokens) {
            *slot = token.parse()?;
        }
        Ok(Self::from_symbols(symbols))
    }
}

impl From<Codeword> for String {
    fn from(code: Codeword) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for Codeword {
    type Error = CodewordParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
