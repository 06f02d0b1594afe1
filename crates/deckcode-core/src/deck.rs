//! Deck-level helpers: the canonical reference order and the deck string codec.
//!
//! A deck string is the concatenation of every card's two-digit, zero-padded
//! deck number, e.g. `"000113"` for ace of hearts, 2 of hearts, ace of spades.

use crate::card::{Card, CardError, DECK_SIZE};

/// Errors returned by [`decode_deck`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckStringError {
    #[error("deck string has odd length {0}")]
    OddLength(usize),
    #[error("invalid card number {token:?} at offset {offset}")]
    InvalidNumber { token: String, offset: usize },
    #[error(transparent)]
    Card(#[from] CardError),
}

/// The reference ordering used for accuracy scoring: suit-major, rank-minor.
///
/// Position `i` holds the card with deck number `i`.
pub fn canonical_order() -> Vec<Card> {
    Card::all().collect()
}

/// Encode a deck as its deck string.
pub fn encode_deck(deck: &[Card]) -> String {
    let mut out = String::with_capacity(deck.len() * 2);
    for card in deck {
        out.push_str(&format!("{:02}", card.index()));
    }
    out
}

/// Decode a deck string produced by [`encode_deck`].
pub fn decode_deck(s: &str) -> Result<Vec<Card>, DeckStringError> {
    let bytes = s.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(DeckStringError::OddLength(bytes.len()));
    }

    let mut deck = Vec::with_capacity(bytes.len() / 2);
    for (pair_idx, pair) in bytes.chunks_exact(2).enumerate() {
        let offset = pair_idx * 2;
        if !pair.iter().all(u8::is_ascii_digit) {
            return Err(DeckStringError::InvalidNumber {
                token: String::from_utf8_lossy(pair).into_owned(),
                offset,
            });
        }
        let number = ((pair[0] - b'0') * 10 + (pair[1] - b'0')) as usize;
        deck.push(Card::from_index(number)?);
    }
    Ok(deck)
}

/// `true` if `deck` holds every card exactly once.
pub fn is_complete(deck: &[Card]) -> bool {
    if deck.len() != DECK_SIZE {
        return false;
    }
    let mut seen = [false; DECK_SIZE];
    for card in deck {
        if std::mem::replace(&mut seen[card.index()], true) {
            return false;
        }
    }
    true
}
