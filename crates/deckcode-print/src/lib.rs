//! Render the printed edge codes of a deck as a binary image.
//!
//! The output looks like a cropped, thresholded photo of a perfectly printed
//! deck: one band of [`PrintSpec::row_height`] rows per card, top to bottom.
//! Each band holds a calibration mark followed by the card's four symbols.
//! Useful as a test fixture and for checking a codebook before printing.

use deckcode_codebook::{Codebook, Codeword};
use deckcode_core::{Card, GrayImage, BLACK, WHITE};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("printed pattern needs {needed} px, image width is {width}")]
    TooNarrow { needed: usize, width: usize },
    #[error("unit and spacer widths must be non-zero")]
    ZeroWidth,
}

#[derive(thiserror::Error, Debug)]
pub enum PrintIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Geometry of the printed pattern, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSpec {
    /// Image rows per card.
    pub row_height: usize,
    /// Width of one bit cell.
    pub unit_px: usize,
    /// White gap around the calibration mark and after every symbol.
    pub spacer_px: usize,
    /// Total image width; the pattern is padded with white on the right.
    pub width: usize,
}

impl Default for PrintSpec {
    fn default() -> Self {
        Self {
            row_height: 6,
            unit_px: 15,
            spacer_px: 20,
            width: 312,
        }
    }
}

impl PrintSpec {
    /// Width of the calibration mark plus four symbols, without padding.
    pub fn pattern_width(&self) -> usize {
        // spacer, black, white, black, spacer, then (two cells + spacer) per symbol
        2 * self.spacer_px + 3 * self.unit_px + 4 * (2 * self.unit_px + self.spacer_px)
    }

    fn validate(&self) -> Result<(), PrintError> {
        if self.unit_px == 0 || self.spacer_px == 0 {
            return Err(PrintError::ZeroWidth);
        }
        let needed = self.pattern_width();
        if needed > self.width {
            return Err(PrintError::TooNarrow {
                needed,
                width: self.width,
            });
        }
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PrintIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PrintIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn push_run(row: &mut Vec<u8>, value: u8, len: usize) {
    row.extend(std::iter::repeat_n(value, len));
}

/// One scanline of `codeword`, exactly `spec.width` pixels wide.
pub fn render_row(codeword: Codeword, spec: &PrintSpec) -> Result<Vec<u8>, PrintError> {
    spec.validate()?;

    let mut row = Vec::with_capacity(spec.width);
    push_run(&mut row, WHITE, spec.spacer_px);
    push_run(&mut row, BLACK, spec.unit_px);
    push_run(&mut row, WHITE, spec.unit_px);
    push_run(&mut row, BLACK, spec.unit_px);
    push_run(&mut row, WHITE, spec.spacer_px);

    for pair in codeword.cells().chunks_exact(2) {
        for &cell in pair {
            let value = if cell == 1 { BLACK } else { WHITE };
            push_run(&mut row, value, spec.unit_px);
        }
        push_run(&mut row, WHITE, spec.spacer_px);
    }

    row.resize(spec.width, WHITE);
    Ok(row)
}

/// Render `cards` top to bottom, one band of `spec.row_height` rows each.
pub fn render_deck(
    cards: &[Card],
    codebook: &Codebook,
    spec: &PrintSpec,
) -> Result<GrayImage, PrintError> {
    spec.validate()?;

    let mut data = Vec::with_capacity(cards.len() * spec.row_height * spec.width);
    for card in cards {
        let codeword = codebook.encode(*card);
        if !codeword.is_printable() {
            log::warn!("{card} has codeword {codeword} with a blank symbol; it will not scan");
        }
        let row = render_row(codeword, spec)?;
        for _ in 0..spec.row_height {
            data.extend_from_slice(&row);
        }
    }

    Ok(GrayImage {
        width: spec.width,
        height: cards.len() * spec.row_height,
        data,
    })
}
