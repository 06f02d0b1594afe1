use serde::{Deserialize, Serialize};

/// Symbol classification thresholds, as multiples of the unit width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolThresholds {
    /// A black run at least this wide covers both cells (`11`).
    pub long_black: f64,
    /// A white run wider than this ends in an empty cell (`01`), unless the
    /// previous symbol already left its right cell white.
    pub wide_white: f64,
    /// A white run wider than this is read as `01` regardless of context.
    pub extra_wide_white: f64,
}

impl Default for SymbolThresholds {
    fn default() -> Self {
        Self {
            long_black: 1.17,
            wide_white: 1.9,
            extra_wide_white: 2.94,
        }
    }
}

/// Multi-row consensus settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusParams {
    /// Minimum number of consecutive decoded rows that must agree on a card.
    pub min_repeats: usize,
    /// If true, a card confirmed in several separate blocks is emitted once,
    /// at its first block. Off by default: every confirmed block is a card.
    pub dedup_cards: bool,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self {
            min_repeats: 2,
            dedup_cards: false,
        }
    }
}

/// Configuration for the deck scanner.
///
/// All fields have defaults, so a JSON config only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    /// Pixel runs shorter than this are sensor noise and are dropped.
    pub min_run_len: usize,
    /// Pixel tolerance when matching the calibration triple.
    pub variance: usize,
    pub thresholds: SymbolThresholds,
    pub consensus: ConsensusParams,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            min_run_len: 2,
            variance: 6,
            thresholds: SymbolThresholds::default(),
            consensus: ConsensusParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: ScanParams =
            serde_json::from_str(r#"{"variance": 4, "thresholds": {"long_black": 1.3}}"#).unwrap();
        assert_eq!(params.variance, 4);
        assert_eq!(params.min_run_len, 2);
        assert_eq!(params.thresholds.long_black, 1.3);
        assert_eq!(params.thresholds.wide_white, 1.9);
        assert_eq!(params.consensus, ConsensusParams::default());
    }
}
