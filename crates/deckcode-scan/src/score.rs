use deckcode_core::{canonical_order, Card, DECK_SIZE};

/// Positional tolerance when matching against the canonical order.
pub const SCORE_WINDOW: usize = 1;

/// Percentage of canonical positions whose expected card appears in `deck`
/// within [`SCORE_WINDOW`] slots of that position.
///
/// Never fails: a short or empty deck just scores lower.
pub fn accuracy_score(deck: &[Card]) -> f64 {
    let matches = canonical_order()
        .iter()
        .enumerate()
        .filter(|&(index, expected)| {
            let lo = index.saturating_sub(SCORE_WINDOW);
            let hi = (index + SCORE_WINDOW + 1).min(deck.len());
            lo < hi && deck[lo..hi].contains(expected)
        })
        .count();
    matches as f64 / DECK_SIZE as f64 * 100.0
}
