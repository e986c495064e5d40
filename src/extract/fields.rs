//! Field extractors
//!
//! Each extractor runs independently over normalized text. A field that is
//! not found is `None`; deciding whether that matters is left to validation.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns;
use super::types::ExtractError;
use crate::signal::Direction;

/// Quote currency every symbol is expressed in
pub const QUOTE_ASSET: &str = "USDT";

/// Raw per-field extraction results for one message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub symbol: Option<String>,
    pub direction: Option<Direction>,
    pub entry_price: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    /// Strictly ascending, positive
    pub take_profit_levels: Vec<Decimal>,
    /// Leverage as written, before clamping
    pub leverage: Option<u32>,
}

impl ExtractedFields {
    /// Run every field extractor over normalized text
    pub fn extract(text: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            symbol: extract_symbol(text)?,
            direction: extract_direction(text)?,
            entry_price: extract_entry_price(text)?,
            stop_loss: extract_stop_loss(text)?,
            take_profit_levels: extract_take_profits(text)?,
            leverage: extract_leverage(text)?,
        })
    }

    /// Number of the six signal fields that were found
    pub fn fields_found(&self) -> usize {
        [
            self.symbol.is_some(),
            self.direction.is_some(),
            self.entry_price.is_some(),
            self.stop_loss.is_some(),
            !self.take_profit_levels.is_empty(),
            self.leverage.is_some(),
        ]
        .iter()
        .filter(|found| **found)
        .count()
    }
}

/// Parse a matched price token
///
/// Trailing dots (sentence punctuation) are dropped; anything else that is
/// not a plain decimal is rejected.
pub fn parse_price(token: &str) -> Option<Decimal> {
    let token = token.trim_end_matches('.');
    if token.is_empty() || token == "-" {
        return None;
    }
    Decimal::from_str(token).ok()
}

/// Express a ticker in the quote asset
///
/// `BTC` becomes `BTCUSDT`; `ETHUSDT` is returned unchanged.
pub fn quote_symbol(ticker: &str) -> String {
    if ticker.ends_with(QUOTE_ASSET) {
        ticker.to_string()
    } else {
        format!("{ticker}{QUOTE_ASSET}")
    }
}

pub fn extract_symbol(text: &str) -> Result<Option<String>, ExtractError> {
    patterns::SYMBOL.first_match(text, |token| Some(quote_symbol(token)))
}

pub fn extract_direction(text: &str) -> Result<Option<Direction>, ExtractError> {
    patterns::DIRECTION.first_match(text, Direction::from_keyword)
}

pub fn extract_entry_price(text: &str) -> Result<Option<Decimal>, ExtractError> {
    patterns::ENTRY_PRICE.first_match(text, parse_price)
}

pub fn extract_stop_loss(text: &str) -> Result<Option<Decimal>, ExtractError> {
    patterns::STOP_LOSS.first_match(text, parse_price)
}

/// Collect take profit levels from every label, deduplicated and ascending
pub fn extract_take_profits(text: &str) -> Result<Vec<Decimal>, ExtractError> {
    let mut levels: Vec<Decimal> = patterns::TAKE_PROFIT
        .all_matches(text, parse_price)?
        .into_iter()
        .filter(|level| *level > Decimal::ZERO)
        .collect();
    levels.sort();
    levels.dedup();
    Ok(levels)
}

/// Raw leverage multiplier; every pattern captures digits only, so a token
/// too large for `u32` saturates instead of being dropped
pub fn extract_leverage(text: &str) -> Result<Option<u32>, ExtractError> {
    patterns::LEVERAGE.first_match(text, |token| Some(token.parse::<u32>().unwrap_or(u32::MAX)))
}
