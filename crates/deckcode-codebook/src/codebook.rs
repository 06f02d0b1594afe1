//! Card <-> codeword catalog with O(1) lookup in both directions.

use crate::codeword::Codeword;
use crate::generate::card_code;
use deckcode_core::{Card, CardError, DECK_SIZE};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Errors returned when building a [`Codebook`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodebookError {
    #[error("codeword {codeword} assigned to both {first} and {second}")]
    Collision {
        codeword: Codeword,
        first: Card,
        second: Card,
    },
    #[error("{0} listed more than once")]
    DuplicateCard(Card),
    #[error("no codeword for {0}")]
    MissingCard(Card),
    #[error(transparent)]
    Card(#[from] CardError),
}

#[derive(thiserror::Error, Debug)]
pub enum CodebookIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Codebook(#[from] CodebookError),
}

/// One row of a tabulated codebook, as stored in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebookEntry {
    pub rank: u8,
    pub suit: u8,
    pub codeword: Codeword,
}

/// The catalog of 52 card codewords.
///
/// Every card has exactly one codeword and no two cards share one; both
/// constructors verify this and refuse to build otherwise. A codebook is
/// immutable once built and is shared read-only by all scan workers.
#[derive(Clone, Debug)]
pub struct Codebook {
    by_card: [Codeword; DECK_SIZE],
    by_code: [Option<Card>; 256],
}

impl Codebook {
    /// Generate the standard codebook from the rank and suit sub-codes.
    pub fn generate() -> Result<Self, CodebookError> {
        let book = Self::from_entries(Card::all().map(|card| (card, card_code(card))))?;
        log::debug!(
            "generated codebook: {} codewords, {} printable",
            DECK_SIZE,
            book.printable_count()
        );
        Ok(book)
    }

    /// Build a codebook from an explicit card -> codeword table.
    ///
    /// The table must list each of the 52 cards exactly once, with pairwise
    /// distinct codewords.
    pub fn from_entries<I>(entries: I) -> Result<Self, CodebookError>
    where
        I: IntoIterator<Item = (Card, Codeword)>,
    {
        let mut by_card: [Option<Codeword>; DECK_SIZE] = [None; DECK_SIZE];
        let mut by_code: [Option<Card>; 256] = [None; 256];

        for (card, codeword) in entries {
            let slot = &mut by_card[card.index()];
            if slot.is_some() {
                return Err(CodebookError::DuplicateCard(card));
            }
            let code_slot = &mut by_code[codeword.packed() as usize];
            if let Some(first) = *code_slot {
                return Err(CodebookError::Collision {
                    codeword,
                    first,
                    second: card,
                });
            }
            *slot = Some(codeword);
            *code_slot = Some(card);
        }

        let mut resolved = [Codeword::from_packed(0); DECK_SIZE];
        for (card, (out, slot)) in Card::all().zip(resolved.iter_mut().zip(by_card)) {
            *out = slot.ok_or(CodebookError::MissingCard(card))?;
        }

        Ok(Self {
            by_card: resolved,
            by_code,
        })
    }

    /// Build a codebook from JSON-style entries.
    pub fn from_table(entries: &[CodebookEntry]) -> Result<Self, CodebookError> {
        let pairs = entries
            .iter()
            .map(|e| Ok((Card::new(e.rank, e.suit)?, e.codeword)))
            .collect::<Result<Vec<_>, CodebookError>>()?;
        Self::from_entries(pairs)
    }

    /// Load a tabulated codebook from a JSON array of [`CodebookEntry`].
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CodebookIoError> {
        let raw = fs::read_to_string(path)?;
        let entries: Vec<CodebookEntry> = serde_json::from_str(&raw)?;
        Ok(Self::from_table(&entries)?)
    }

    /// Write this codebook to disk as a pretty JSON table.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CodebookIoError> {
        let json = serde_json::to_string_pretty(&self.to_table())?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn to_table(&self) -> Vec<CodebookEntry> {
        self.entries()
            .map(|(card, codeword)| CodebookEntry {
                rank: card.rank(),
                suit: card.suit(),
                codeword,
            })
            .collect()
    }

    /// Codeword printed on `card`.
    #[inline]
    pub fn encode(&self, card: Card) -> Codeword {
        self.by_card[card.index()]
    }

    /// Card carrying `codeword`, if any.
    #[inline]
    pub fn lookup(&self, codeword: Codeword) -> Option<Card> {
        self.by_code[codeword.packed() as usize]
    }

    /// Look up the text form of a codeword, e.g. `"01 10 11 01"`.
    pub fn lookup_str(&self, text: &str) -> Option<Card> {
        text.parse().ok().and_then(|code| self.lookup(code))
    }

    /// `(card, codeword)` pairs in deck-number order.
    pub fn entries(&self) -> impl Iterator<Item = (Card, Codeword)> + '_ {
        Card::all().map(move |card| (card, self.encode(card)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        DECK_SIZE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of cards whose codeword a scanline can recover.
    pub fn printable_count(&self) -> usize {
        self.by_card.iter().filter(|c| c.is_printable()).count()
    }
}
