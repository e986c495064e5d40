//! Extraction types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signal::ExtractedSignal;

/// Signal field a pattern feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Symbol,
    Direction,
    EntryPrice,
    StopLoss,
    TakeProfit,
    Leverage,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Symbol => "symbol",
            Field::Direction => "direction",
            Field::EntryPrice => "entry_price",
            Field::StopLoss => "stop_loss",
            Field::TakeProfit => "take_profit",
            Field::Leverage => "leverage",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal extraction faults
///
/// These never reach callers of [`super::SignalExtractor::extract`], which
/// reports them as "no signal".
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A pattern matched but did not produce its value capture
    #[error("Pattern {pattern} for {field} matched without a value capture")]
    MissingCapture { field: Field, pattern: String },
}

/// Why a message did not yield a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NoSignalReason {
    /// No ticker found
    MissingSymbol,
    /// No LONG/SHORT/BUY/SELL keyword found
    MissingDirection,
    /// No parsable entry price found
    MissingEntry,
    /// Entry price is zero or negative
    NonPositiveEntry(Decimal),
    /// Stop loss present but zero or negative
    NonPositiveStopLoss(Decimal),
}

impl NoSignalReason {
    /// Short label for metrics
    pub fn label(&self) -> &'static str {
        match self {
            NoSignalReason::MissingSymbol => "missing_symbol",
            NoSignalReason::MissingDirection => "missing_direction",
            NoSignalReason::MissingEntry => "missing_entry",
            NoSignalReason::NonPositiveEntry(_) => "non_positive_entry",
            NoSignalReason::NonPositiveStopLoss(_) => "non_positive_stop_loss",
        }
    }
}

impl std::fmt::Display for NoSignalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoSignalReason::MissingSymbol => write!(f, "No symbol found"),
            NoSignalReason::MissingDirection => write!(f, "No direction found"),
            NoSignalReason::MissingEntry => write!(f, "No entry price found"),
            NoSignalReason::NonPositiveEntry(p) => write!(f, "Entry price {} is not positive", p),
            NoSignalReason::NonPositiveStopLoss(p) => {
                write!(f, "Stop loss {} is not positive", p)
            }
        }
    }
}

/// Outcome of running the extraction pipeline on one message
#[derive(Debug, Clone)]
pub enum Extraction {
    /// Signal recovered (boxed to reduce enum size)
    Signal(Box<ExtractedSignal>),
    /// Message did not contain a usable signal
    NoSignal(NoSignalReason),
}

impl Extraction {
    pub fn into_signal(self) -> Option<ExtractedSignal> {
        match self {
            Extraction::Signal(signal) => Some(*signal),
            Extraction::NoSignal(_) => None,
        }
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, Extraction::Signal(_))
    }
}
