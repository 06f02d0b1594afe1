//! Codeword construction from rank and suit sub-codes.

use crate::codeword::Codeword;
use crate::symbol::Symbol;
use deckcode_core::Card;

/// Rank sub-code: a bounded-run positional code, most significant symbol first.
///
/// Symbol `k` (testing `2^k` for `k = 4, 3, 2, 1`) is `01` when
/// `rank mod 2^k < 2^(k-1)` and `10` otherwise.
pub fn rank_code(rank: u8) -> Codeword {
    let symbols = [4u32, 3, 2, 1].map(|k| {
        let modulus = 1u32 << k;
        if (rank as u32) % modulus < modulus / 2 {
            Symbol::Right
        } else {
            Symbol::Left
        }
    });
    Codeword::from_symbols(symbols)
}

/// Suit sub-code: a thermometer code, `01` for every threshold `3, 2, 1, 0`
/// the suit reaches and `00` otherwise.
pub fn suit_code(suit: u8) -> Codeword {
    let symbols = [3u8, 2, 1, 0].map(|i| {
        if suit >= i {
            Symbol::Right
        } else {
            Symbol::Blank
        }
    });
    Codeword::from_symbols(symbols)
}

/// Carry-coupled sum of two codewords.
///
/// Bit positions count from the least significant (last printed) cell. The
/// top bit is the plain sum mod 2. Every lower bit `i` is the sum mod 2 of
/// both operands' bit `i`, plus one when both operands have bit `i + 1` set.
/// The carry therefore moves from the higher bit into the lower one and never
/// ripples further, which is not ordinary binary addition.
#[inline]
pub fn combine(a: Codeword, b: Codeword) -> Codeword {
    let (a, b) = (a.packed(), b.packed());
    Codeword::from_packed(a ^ b ^ ((a & b) >> 1))
}

/// The printed codeword of `card`: `combine(rank_code, suit_code)`.
pub fn card_code(card: Card) -> Codeword {
    combine(rank_code(card.rank()), suit_code(card.suit()))
}
