//! Signal types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::risk::RiskReward;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Profit when price rises (BUY / LONG)
    Long,
    /// Profit when price falls (SELL / SHORT)
    Short,
}

impl Direction {
    /// Map a chat keyword onto a direction
    ///
    /// `BUY` and `LONG` are long, `SELL` and `SHORT` are short. Anything else
    /// is not a direction.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "LONG" | "BUY" => Some(Direction::Long),
            "SHORT" | "SELL" => Some(Direction::Short),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trading signal recovered from a chat message
///
/// Only built by the extractor once symbol, direction and a positive entry
/// price are known. Nothing is checked about where stop loss and targets sit
/// relative to the entry; see [`crate::signal::assess_levels`] for that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSignal {
    /// Unique signal identifier
    pub id: Uuid,
    /// Ticker, always quoted in USDT
    pub symbol: String,
    /// Trade direction
    pub direction: Direction,
    /// Entry price (> 0)
    pub entry_price: Decimal,
    /// Stop loss price (> 0 when present)
    pub stop_loss: Option<Decimal>,
    /// Take profit levels, strictly ascending
    pub take_profit_levels: Vec<Decimal>,
    /// Leverage multiplier in [1, max_leverage]
    pub leverage: u32,
    /// Completeness score in [0, 1]
    pub confidence: Decimal,
    /// Normalized text the signal was extracted from
    pub raw_message: String,
    /// Caller supplied origin label
    pub source_tag: String,
    /// Extraction timestamp
    pub extracted_at: DateTime<Utc>,
}

impl ExtractedSignal {
    /// Create a new signal stamped with a fresh id and the current time
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: String,
        direction: Direction,
        entry_price: Decimal,
        stop_loss: Option<Decimal>,
        take_profit_levels: Vec<Decimal>,
        leverage: u32,
        confidence: Decimal,
        raw_message: String,
        source_tag: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol,
            direction,
            entry_price,
            stop_loss,
            take_profit_levels,
            leverage,
            confidence,
            raw_message,
            source_tag,
            extracted_at: Utc::now(),
        }
    }

    pub fn is_long(&self) -> bool {
        self.direction == Direction::Long
    }

    pub fn is_short(&self) -> bool {
        self.direction == Direction::Short
    }

    /// Nearest take profit, i.e. the lowest level
    pub fn first_take_profit(&self) -> Option<Decimal> {
        self.take_profit_levels.first().copied()
    }

    /// Compute risk/reward against the stop loss and first target
    pub fn risk_reward(&self) -> RiskReward {
        RiskReward::calculate(self)
    }
}

/// Payload forwarded to the signal backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSubmission {
    pub id: Uuid,
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: Decimal,
    pub stop_loss: Option<Decimal>,
    pub take_profits: Vec<Decimal>,
    pub leverage: u32,
    pub original_message: String,
    pub confidence_score: Decimal,
    pub risk_reward: Decimal,
    pub source: String,
    pub parsed_at: DateTime<Utc>,
}

impl From<&ExtractedSignal> for SignalSubmission {
    fn from(signal: &ExtractedSignal) -> Self {
        Self {
            id: signal.id,
            symbol: signal.symbol.clone(),
            direction: signal.direction,
            entry_price: signal.entry_price,
            stop_loss: signal.stop_loss,
            take_profits: signal.take_profit_levels.clone(),
            leverage: signal.leverage,
            original_message: signal.raw_message.clone(),
            confidence_score: signal.confidence,
            risk_reward: signal.risk_reward().ratio,
            source: signal.source_tag.clone(),
            parsed_at: signal.extracted_at,
        }
    }
}
