//! Core types for reading edge-coded playing card decks.
//!
//! This crate is intentionally small. It holds the card identity, the deck
//! string codec and the reference order, plus the plain pixel containers the
//! decoder reads from. It knows nothing about codewords or image capture.

mod card;
mod deck;
mod image;
mod logger;

pub use card::{Card, CardError, DECK_SIZE, RANK_COUNT, SUIT_COUNT};
pub use deck::{canonical_order, decode_deck, encode_deck, is_complete, DeckStringError};
pub use image::{is_white, GrayImage, GrayImageView, ImageError, BLACK, WHITE};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
