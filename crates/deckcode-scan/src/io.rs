//! JSON configuration and report helpers for deck scanning.

use crate::params::ScanParams;
use crate::scanner::{DeckScan, DeckScanner, RowStats};
use deckcode_codebook::{Codebook, CodebookError, CodebookIoError};
use deckcode_core::encode_deck;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ScanIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    CodebookIo(#[from] CodebookIoError),
    #[error(transparent)]
    Codebook(#[from] CodebookError),
}

fn default_threshold() -> u8 {
    128
}

/// Configuration for scanning one deck image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub image_path: String,
    /// Grey level at or above which a pixel counts as paper.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Tabulated codebook; the generated one is used when absent.
    #[serde(default)]
    pub codebook_path: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Include the accuracy score against the canonical order in the report.
    #[serde(default)]
    pub score: bool,
    #[serde(default)]
    pub params: ScanParams,
}

impl ScanConfig {
    /// Config with defaults for everything but the image path.
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            threshold: default_threshold(),
            codebook_path: None,
            output_path: None,
            score: false,
            params: ScanParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ScanIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ScanIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("deckcode_report.json"))
    }

    /// Load the configured codebook, or generate the standard one.
    pub fn build_codebook(&self) -> Result<Codebook, ScanIoError> {
        match &self.codebook_path {
            Some(path) => Ok(Codebook::load_json(path)?),
            None => Ok(Codebook::generate()?),
        }
    }

    /// Build a scanner from this config.
    pub fn build_scanner(&self) -> Result<DeckScanner, ScanIoError> {
        Ok(DeckScanner::new(self.build_codebook()?, self.params.clone()))
    }
}

/// Scan result as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Deck string: two-digit card numbers, concatenated.
    pub data: String,
    pub cards: Vec<String>,
    pub rows: usize,
    pub decoded_rows: usize,
    pub failures: RowFailures,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Failed rows by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailures {
    pub no_alignment: usize,
    pub insufficient_runs: usize,
    pub unknown_codeword: usize,
}

impl From<&RowStats> for RowFailures {
    fn from(stats: &RowStats) -> Self {
        Self {
            no_alignment: stats.no_alignment,
            insufficient_runs: stats.insufficient_runs,
            unknown_codeword: stats.unknown_codeword,
        }
    }
}

impl ScanReport {
    pub fn from_scan(scan: &DeckScan, with_score: bool) -> Self {
        Self {
            data: encode_deck(&scan.deck),
            cards: scan.deck.iter().map(ToString::to_string).collect(),
            rows: scan.stats.rows,
            decoded_rows: scan.stats.decoded,
            failures: RowFailures::from(&scan.stats),
            score: with_score.then(|| scan.score()),
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ScanIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ScanIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
