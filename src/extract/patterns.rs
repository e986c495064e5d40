//! Pattern table
//!
//! Each field owns an ordered list of patterns. Signal providers label the
//! same concept differently ("ENTRY:", "BUY:", "@"), so later patterns are
//! fallbacks for other message styles. Every pattern has exactly one capture
//! group holding the value, and all of them run against normalized text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{ExtractError, Field};

/// Ordered patterns for one field
pub struct PatternSet {
    pub field: Field,
    patterns: Vec<Regex>,
}

impl PatternSet {
    fn compile(field: Field, sources: &[&str]) -> Self {
        let patterns = sources
            .iter()
            .map(|src| Regex::new(src).expect("Invalid signal pattern regex"))
            .collect();
        Self { field, patterns }
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Try patterns in order and return the first candidate `convert` accepts
    ///
    /// A candidate `convert` rejects (e.g. a malformed number) is skipped and
    /// the next pattern is tried.
    pub fn first_match<T>(
        &self,
        text: &str,
        convert: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, ExtractError> {
        for pattern in &self.patterns {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            let token = value_capture(self.field, pattern, &caps)?;
            match convert(token) {
                Some(value) => return Ok(Some(value)),
                None => {
                    tracing::trace!(field = %self.field, token, "Discarding unparsable candidate");
                }
            }
        }
        Ok(None)
    }

    /// Collect every accepted candidate of every pattern, in pattern order
    pub fn all_matches<T>(
        &self,
        text: &str,
        convert: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<T>, ExtractError> {
        let mut values = Vec::new();
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(text) {
                let token = value_capture(self.field, pattern, &caps)?;
                match convert(token) {
                    Some(value) => values.push(value),
                    None => {
                        tracing::trace!(field = %self.field, token, "Discarding unparsable candidate");
                    }
                }
            }
        }
        Ok(values)
    }
}

fn value_capture<'t>(
    field: Field,
    pattern: &Regex,
    caps: &regex::Captures<'t>,
) -> Result<&'t str, ExtractError> {
    caps.get(1)
        .map(|m| m.as_str())
        .ok_or_else(|| ExtractError::MissingCapture {
            field,
            pattern: pattern.as_str().to_string(),
        })
}

// =============================================================================
// FIELD PATTERNS
// =============================================================================

/// Base asset quoted in USDT/USD, `#TICKER`, `TICKER/USDT`, `COIN:`, `SYMBOL:`
pub static SYMBOL: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(
        Field::Symbol,
        &[
            r"([A-Z]{2,10})USDT?",
            r"#([A-Z]{2,10})",
            r"([A-Z]{2,10})/USDT?",
            r"\bCOIN:\s*([A-Z]{2,10})\b",
            r"\bSYMBOL:\s*([A-Z]{2,10})\b",
        ],
    )
});

/// Direction keyword, bare or labeled
pub static DIRECTION: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(
        Field::Direction,
        &[
            r"\b(LONG|SHORT|BUY|SELL)\b",
            r"\bDIRECTION:?\s*(LONG|SHORT|BUY|SELL)\b",
            r"\bSIDE:?\s*(LONG|SHORT|BUY|SELL)\b",
        ],
    )
});

/// Entry price; the last pattern takes a bare number right after the direction
///
/// Unlabeled numbers and `BUY` numbers must end at whitespace so a leverage
/// token such as `LONG 10X` is never read as an entry.
pub static ENTRY_PRICE: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(
        Field::EntryPrice,
        &[
            r"\bENTRY:?\s*(-?[0-9.]+)",
            r"\bBUY:?\s*(-?[0-9.]+)(?:\s|$)",
            r"\bPRICE:?\s*(-?[0-9.]+)",
            r"\bENTER:?\s*(-?[0-9.]+)",
            r"@\s*(-?[0-9.]+)",
            r"\b(?:LONG|SHORT|BUY|SELL)\s+(-?[0-9.]+)(?:\s|$)",
        ],
    )
});

pub static STOP_LOSS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(
        Field::StopLoss,
        &[
            r"\bSTOP[\s-]*LOSS:?\s*(-?[0-9.]+)",
            r"\bSL:?\s*(-?[0-9.]+)",
            r"\bSTOP:?\s*(-?[0-9.]+)",
        ],
    )
});

/// Take profit labels, optionally numbered (`TP1`, `TP 2:`, `TARGET 3`)
pub static TAKE_PROFIT: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(
        Field::TakeProfit,
        &[
            r"\bTAKE[\s-]*PROFIT(?:\s*[1-9]\b)?:?\s*([0-9.]+)",
            r"\bTP(?:\s*[1-9]\b)?:?\s*([0-9.]+)",
            r"\bTARGETS?(?:\s*[1-9]\b)?:?\s*([0-9.]+)",
        ],
    )
});

pub static LEVERAGE: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::compile(
        Field::Leverage,
        &[
            r"\bLEVERAGE:?\s*([0-9]+)\s*X\b",
            r"\b([0-9]+)X\b",
            r"\bLEV(?:ERAGE)?:?\s*([0-9]+)",
        ],
    )
});

/// All field tables, in extraction order
pub fn all_sets() -> [&'static PatternSet; 6] {
    [
        &*SYMBOL,
        &*DIRECTION,
        &*ENTRY_PRICE,
        &*STOP_LOSS,
        &*TAKE_PROFIT,
        &*LEVERAGE,
    ]
}
