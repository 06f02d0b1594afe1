//! Multi-row consensus: turn per-row observations into a deck.

use crate::params::ConsensusParams;
use deckcode_core::Card;
use std::collections::HashSet;

/// A block of consecutive decoded rows that agree on one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardBlock {
    pub card: Card,
    /// Number of decoded rows in the block (unreadable rows are not counted).
    pub repeats: usize,
}

/// Group the decoded rows into maximal blocks of equal cards.
///
/// Unreadable rows are skipped first, so a `None` between two equal cards
/// does not split their block.
pub fn card_blocks(observations: &[Option<Card>]) -> Vec<CardBlock> {
    let mut blocks: Vec<CardBlock> = Vec::new();
    for card in observations.iter().flatten() {
        match blocks.last_mut() {
            Some(block) if block.card == *card => block.repeats += 1,
            _ => blocks.push(CardBlock {
                card: *card,
                repeats: 1,
            }),
        }
    }
    blocks
}

/// Consensus deck from the ordered row observations of one image.
///
/// Blocks shorter than `min_repeats` are dropped as noise. The rest are
/// emitted in row order; with `dedup_cards` a card keeps only its first block.
pub fn aggregate_deck(observations: &[Option<Card>], params: &ConsensusParams) -> Vec<Card> {
    let min_repeats = params.min_repeats.max(1);
    let mut seen = HashSet::new();
    card_blocks(observations)
        .into_iter()
        .filter(|block| block.repeats >= min_repeats)
        .filter(|block| !params.dedup_cards || seen.insert(block.card))
        .map(|block| block.card)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(rank: u8, suit: u8) -> Option<Card> {
        Some(Card::new(rank, suit).unwrap())
    }

    #[test]
    fn singleton_blocks_are_noise() {
        let rows = [c(0, 0), c(0, 0), c(1, 0), None, c(2, 0)];
        let deck = aggregate_deck(&rows, &ConsensusParams::default());
        assert_eq!(deck, vec![Card::new(0, 0).unwrap()]);
    }

    #[test]
    fn unreadable_rows_do_not_split_a_block() {
        let rows = [None, c(4, 1), None, c(4, 1), None, None, c(5, 1), c(5, 1)];
        let blocks = card_blocks(&rows);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].repeats, 2);

        let deck = aggregate_deck(&rows, &ConsensusParams::default());
        assert_eq!(
            deck,
            vec![Card::new(4, 1).unwrap(), Card::new(5, 1).unwrap()]
        );
    }

    #[test]
    fn every_confirmed_block_is_emitted_by_default() {
        let a = Card::new(3, 2).unwrap();
        let b = Card::new(7, 0).unwrap();
        let rows = [Some(a), Some(a), Some(b), Some(b), Some(a), Some(a)];

        let deck = aggregate_deck(&rows, &ConsensusParams::default());
        assert_eq!(deck, vec![a, b, a]);
    }

    #[test]
    fn dedup_keeps_first_block_of_each_card() {
        let a = Card::new(3, 2).unwrap();
        let b = Card::new(7, 0).unwrap();
        let rows = [Some(a), Some(a), Some(b), Some(b), Some(a), Some(a)];

        let params = ConsensusParams {
            dedup_cards: true,
            ..ConsensusParams::default()
        };
        assert_eq!(aggregate_deck(&rows, &params), vec![a, b]);
    }

    #[test]
    fn min_repeats_is_configurable() {
        let rows = [c(1, 1), c(1, 1), c(2, 2), c(2, 2), c(2, 2)];
        let params = ConsensusParams {
            min_repeats: 3,
            ..ConsensusParams::default()
        };
        assert_eq!(aggregate_deck(&rows, &params), vec![Card::new(2, 2).unwrap()]);

        let params = ConsensusParams {
            min_repeats: 1,
            ..ConsensusParams::default()
        };
        assert_eq!(aggregate_deck(&rows, &params).len(), 2);
    }

    #[test]
    fn empty_input_gives_empty_deck() {
        assert!(aggregate_deck(&[], &ConsensusParams::default()).is_empty());
        assert!(aggregate_deck(&[None, None], &ConsensusParams::default()).is_empty());
    }
}
