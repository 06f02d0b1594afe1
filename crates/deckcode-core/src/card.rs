//! Playing card identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of ranks per suit (ace through king).
pub const RANK_COUNT: u8 = 13;
/// Number of suits.
pub const SUIT_COUNT: u8 = 4;
/// Cards in a full deck.
pub const DECK_SIZE: usize = (RANK_COUNT as usize) * (SUIT_COUNT as usize);

const RANK_NAMES: [&str; RANK_COUNT as usize] = [
    "ace", "2", "3", "4", "5", "6", "7", "8", "9", "10", "jack", "queen", "king",
];
const SUIT_NAMES: [&str; SUIT_COUNT as usize] = ["hearts", "spades", "diamonds", "clubs"];

/// Errors returned when constructing a [`Card`] from raw indices.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    #[error("rank index {0} out of range (expected 0..13)")]
    RankOutOfRange(u8),
    #[error("suit index {0} out of range (expected 0..4)")]
    SuitOutOfRange(u8),
    #[error("card number {0} out of range (expected 0..52)")]
    IndexOutOfRange(usize),
}

/// One playing card, identified by rank and suit indices.
///
/// - `rank`: `0` is the ace, `1..=9` are the pips `2..=10`, then jack, queen, king.
/// - `suit`: hearts, spades, diamonds, clubs.
///
/// Cards order by rank first (the ace sorts before every other rank) and by
/// suit within a rank. A `Card` is always in range: the only constructors are
/// the checked ones below, and deserialization goes through the same check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard", into = "RawCard")]
pub struct Card {
    rank: u8,
    suit: u8,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawCard {
    rank: u8,
    suit: u8,
}

impl TryFrom<RawCard> for Card {
    type Error = CardError;
    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::new(raw.rank, raw.suit)
    }
}

impl From<Card> for RawCard {
    fn from(card: Card) -> Self {
        RawCard {
            rank: card.rank,
            suit: card.suit,
        }
    }
}

impl Card {
    /// Build a card, rejecting out-of-range indices.
    pub fn new(rank: u8, suit: u8) -> Result<Self, CardError> {
        if rank >= RANK_COUNT {
            return Err(CardError::RankOutOfRange(rank));
        }
        if suit >= SUIT_COUNT {
            return Err(CardError::SuitOutOfRange(suit));
        }
        Ok(Self { rank, suit })
    }

    /// Build a card from its deck number `suit * 13 + rank`.
    pub fn from_index(index: usize) -> Result<Self, CardError> {
        if index >= DECK_SIZE {
            return Err(CardError::IndexOutOfRange(index));
        }
        let rank = (index % RANK_COUNT as usize) as u8;
        let suit = (index / RANK_COUNT as usize) as u8;
        Ok(Self { rank, suit })
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn suit(&self) -> u8 {
        self.suit
    }

    /// Deck number `suit * 13 + rank`, in `0..52`.
    #[inline]
    pub fn index(&self) -> usize {
        self.suit as usize * RANK_COUNT as usize + self.rank as usize
    }

    pub fn rank_name(&self) -> &'static str {
        RANK_NAMES[self.rank as usize]
    }

    pub fn suit_name(&self) -> &'static str {
        SUIT_NAMES[self.suit as usize]
    }

    /// All 52 cards in deck-number order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..DECK_SIZE).map(|index| Card {
            rank: (index % RANK_COUNT as usize) as u8,
            suit: (index / RANK_COUNT as usize) as u8,
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank_name(), self.suit_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_indices() {
        assert_eq!(Card::new(13, 0), Err(CardError::RankOutOfRange(13)));
        assert_eq!(Card::new(0, 4), Err(CardError::SuitOutOfRange(4)));
        assert_eq!(Card::from_index(52), Err(CardError::IndexOutOfRange(52)));
    }

    #[test]
    fn index_round_trips() {
        for (i, card) in Card::all().enumerate() {
            assert_eq!(card.index(), i);
            assert_eq!(Card::from_index(i).unwrap(), card);
        }
        let queen_of_diamonds = Card::new(11, 2).unwrap();
        assert_eq!(queen_of_diamonds.index(), 37);
    }

    #[test]
    fn ace_sorts_first_then_suit_breaks_ties() {
        let ace_clubs = Card::new(0, 3).unwrap();
        let two_hearts = Card::new(1, 0).unwrap();
        let king_hearts = Card::new(12, 0).unwrap();
        let king_spades = Card::new(12, 1).unwrap();
        assert!(ace_clubs < two_hearts);
        assert!(two_hearts < king_hearts);
        assert!(king_hearts < king_spades);

        let mut cards = vec![king_spades, two_hearts, ace_clubs, king_hearts];
        cards.sort();
        assert_eq!(cards, vec![ace_clubs, two_hearts, king_hearts, king_spades]);
    }

    #[test]
    fn display_uses_names() {
        assert_eq!(Card::new(0, 0).unwrap().to_string(), "ace of hearts");
        assert_eq!(Card::new(9, 1).unwrap().to_string(), "10 of spades");
        assert_eq!(Card::new(12, 3).unwrap().to_string(), "king of clubs");
    }

    #[test]
    fn deserialization_is_range_checked() {
        let ok: Card = serde_json::from_str(r#"{"rank":10,"suit":2}"#).unwrap();
        assert_eq!(ok, Card::new(10, 2).unwrap());
        assert!(serde_json::from_str::<Card>(r#"{"rank":13,"suit":0}"#).is_err());
    }
}
