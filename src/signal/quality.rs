//! Signal quality assessment
//!
//! Confidence is how complete the signal is. Level issues flag stops and
//! targets that sit on the wrong side of the entry for the direction; they
//! are reported, never corrected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Direction, ExtractedSignal};

/// Fields a complete signal carries: symbol, direction, entry, stop loss,
/// take profit and leverage
pub const SIGNAL_FIELDS: usize = 6;

/// Fraction of signal fields present, rounded to 2 dp
pub fn completeness_confidence(fields_found: usize) -> Decimal {
    let found = fields_found.min(SIGNAL_FIELDS);
    (Decimal::from(found as u64) / Decimal::from(SIGNAL_FIELDS as u64)).round_dp(2)
}

/// A price level inconsistent with the signal direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelIssue {
    /// Stop loss at or beyond the entry in the profitable direction
    StopLossOnWrongSide(Decimal),
    /// Take profit at or beyond the entry in the losing direction
    TakeProfitOnWrongSide(Decimal),
}

impl std::fmt::Display for LevelIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelIssue::StopLossOnWrongSide(p) => write!(f, "Stop loss {} on wrong side of entry", p),
            LevelIssue::TakeProfitOnWrongSide(p) => {
                write!(f, "Take profit {} on wrong side of entry", p)
            }
        }
    }
}

/// Check stop loss and targets against the entry for the signal direction
///
/// LONG expects stop < entry < targets, SHORT the mirror image.
pub fn assess_levels(signal: &ExtractedSignal) -> Vec<LevelIssue> {
    let entry = signal.entry_price;
    let mut issues = Vec::new();

    if let Some(stop_loss) = signal.stop_loss {
        let wrong_side = match signal.direction {
            Direction::Long => stop_loss >= entry,
            Direction::Short => stop_loss <= entry,
        };
        if wrong_side {
            issues.push(LevelIssue::StopLossOnWrongSide(stop_loss));
        }
    }

    for &level in &signal.take_profit_levels {
        let wrong_side = match signal.direction {
            Direction::Long => level <= entry,
            Direction::Short => level >= entry,
        };
        if wrong_side {
            issues.push(LevelIssue::TakeProfitOnWrongSide(level));
        }
    }

    issues
}
