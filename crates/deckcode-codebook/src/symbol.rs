//! Printed symbols: one bit pair, drawn as two unit-width cells.

use std::fmt;
use std::str::FromStr;

/// One printed bit pair. The first bit is the left cell, `1` is black ink.
///
/// The scanner only ever reads [`Symbol::Right`], [`Symbol::Left`] and
/// [`Symbol::Full`]. [`Symbol::Blank`] exists because the suit sub-code uses
/// it, and because a combined codeword may still contain one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Symbol {
    /// `"00"`: no ink.
    Blank = 0b00,
    /// `"01"`: ink in the right cell.
    Right = 0b01,
    /// `"10"`: ink in the left cell.
    Left = 0b10,
    /// `"11"`: ink across both cells.
    Full = 0b11,
}

/// Error returned when a symbol token is not one of `00`, `01`, `10`, `11`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid symbol {0:?} (expected 00, 01, 10 or 11)")]
pub struct SymbolParseError(pub String);

impl Symbol {
    /// Decode the two low bits of `bits`.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Symbol::Blank,
            0b01 => Symbol::Right,
            0b10 => Symbol::Left,
            _ => Symbol::Full,
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Blank => "00",
            Symbol::Right => "01",
            Symbol::Left => "10",
            Symbol::Full => "11",
        }
    }

    /// `true` if the symbol leaves ink on the card, i.e. the scanner can see it.
    #[inline]
    pub fn is_inked(self) -> bool {
        self != Symbol::Blank
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = SymbolParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "00" => Ok(Symbol::Blank),
            "01" => Ok(Symbol::Right),
            "10" => Ok(Symbol::Left),
            "11" => Ok(Symbol::Full),
            _ => Err(SymbolParseError(s.to_string())),
        }
    }
}
