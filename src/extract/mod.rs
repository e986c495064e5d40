//! Signal extraction module
//!
//! Turns free-text chat messages into structured trading signals:
//! normalization, independent field extractors, cross-field validation.

mod fields;
mod normalize;
mod patterns;
mod types;
mod validate;

pub use fields::{
    extract_direction, extract_entry_price, extract_leverage, extract_stop_loss,
    extract_symbol, extract_take_profits, parse_price, quote_symbol, ExtractedFields, QUOTE_ASSET,
};
pub use normalize::normalize;
pub use patterns::PatternSet;
pub use types::{ExtractError, Extraction, Field, NoSignalReason};
pub use validate::{validate, RequiredFields};

use std::time::Instant;

use crate::config::ExtractorConfig;
use crate::signal::{completeness_confidence, ExtractedSignal};
use crate::telemetry::{self, CounterMetric, LatencyMetric};

/// Source tag used when the caller does not supply one
pub const DEFAULT_SOURCE: &str = "generic";

/// Default leverage when a message names none
pub const DEFAULT_LEVERAGE: u32 = 1;

/// Leverage cap
pub const MAX_LEVERAGE: u32 = 100;

/// Stateless signal extractor
///
/// Holds only configuration; every call is independent, so one instance can
/// be shared across any number of message handlers.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    max_leverage: u32,
    default_source: String,
}

impl SignalExtractor {
    /// Create an extractor with the default leverage cap and source tag
    pub fn new() -> Self {
        Self {
            max_leverage: MAX_LEVERAGE,
            default_source: DEFAULT_SOURCE.to_string(),
        }
    }

    /// Create from application config
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            max_leverage: config.max_leverage.max(DEFAULT_LEVERAGE),
            default_source: config.default_source.clone(),
        }
    }

    pub fn max_leverage(&self) -> u32 {
        self.max_leverage
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    /// Extract a signal, or `None` if the message does not hold one
    ///
    /// Never fails: internal faults are logged and reported as "no signal"
    /// so a single bad message cannot stop a message stream.
    pub fn extract(&self, raw_message: &str, source_tag: &str) -> Option<ExtractedSignal> {
        let started = Instant::now();
        telemetry::increment(CounterMetric::MessagesProcessed, &[]);

        let result = self.try_extract(raw_message, source_tag);
        telemetry::record_latency(LatencyMetric::Extraction, started.elapsed());

        match result {
            Ok(Extraction::Signal(signal)) => {
                tracing::debug!(
                    id = %signal.id,
                    symbol = %signal.symbol,
                    direction = %signal.direction,
                    entry = %signal.entry_price,
                    source = %signal.source_tag,
                    "Signal detected"
                );
                telemetry::increment(
                    CounterMetric::SignalsDetected,
                    &[("direction", signal.direction.as_str())],
                );
                Some(*signal)
            }
            Ok(Extraction::NoSignal(reason)) => {
                tracing::trace!(%reason, source = source_tag, "No signal in message");
                telemetry::increment(CounterMetric::NoSignal, &[("reason", reason.label())]);
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, source = source_tag, "Signal extraction failed");
                telemetry::increment(CounterMetric::ExtractionFailures, &[]);
                None
            }
        }
    }

    /// Extract using the configured default source tag
    pub fn extract_default(&self, raw_message: &str) -> Option<ExtractedSignal> {
        self.extract(raw_message, &self.default_source)
    }

    /// Run the pipeline and report why nothing was found
    pub fn try_extract(
        &self,
        raw_message: &str,
        source_tag: &str,
    ) -> Result<Extraction, ExtractError> {
        let text = normalize(raw_message);
        let fields = ExtractedFields::extract(&text)?;

        let required = match validate(&fields) {
            Ok(required) => required,
            Err(reason) => return Ok(Extraction::NoSignal(reason)),
        };

        let leverage = fields
            .leverage
            .map_or(DEFAULT_LEVERAGE, |lev| lev.clamp(DEFAULT_LEVERAGE, self.max_leverage));
        let confidence = completeness_confidence(fields.fields_found());

        let signal = ExtractedSignal::new(
            required.symbol,
            required.direction,
            required.entry_price,
            fields.stop_loss,
            fields.take_profit_levels,
            leverage,
            confidence,
            text,
            source_tag.to_string(),
        );

        Ok(Extraction::Signal(Box::new(signal)))
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Direction;
    use rust_decimal_macros::dec;

    #[test]
    fn test_extract_labeled_signal() {
        let extractor = SignalExtractor::new();
        let signal = extractor
            .extract("BTCUSDT LONG Entry: 45000 SL: 44000 TP: 46000", "generic")
            .unwrap();

        assert_eq!(signal.symbol, "BTCUSDT");
        assert_eq!(signal.direction, Direction::Long);
        assert_eq!(signal.entry_price, dec!(45000));
        assert_eq!(signal.stop_loss, Some(dec!(44000)));
        assert_eq!(signal.take_profit_levels, vec![dec!(46000)]);
        assert_eq!(signal.leverage, 1);
        assert_eq!(signal.raw_message, "BTCUSDT LONG ENTRY: 45000 SL: 44000 TP: 46000");
        assert_eq!(signal.source_tag, "generic");
    }

    #[test]
    fn test_extract_hashtag_buy() {
        let signal = SignalExtractor::new()
            .extract_default("#ETH BUY @ 3000 Stop: 2900 Target: 3200")
            .unwrap();

        assert_eq!(signal.symbol, "ETHUSDT");
        assert_eq!(signal.direction, Direction::Long);
        assert_eq!(signal.entry_price, dec!(3000));
        assert_eq!(signal.stop_loss, Some(dec!(2900)));
        assert_eq!(signal.take_profit_levels, vec![dec!(3200)]);
    }

    #[test]
    fn test_extract_unlabeled_short() {
        let signal = SignalExtractor::new()
            .extract_default("SOLUSDT SHORT 150 SL 155 TP1 145 TP2 140")
            .unwrap();

        assert_eq!(signal.symbol, "SOLUSDT");
        assert_eq!(signal.direction, Direction::Short);
        assert_eq!(signal.entry_price, dec!(150));
        assert_eq!(signal.stop_loss, Some(dec!(155)));
        assert_eq!(signal.take_profit_levels, vec![dec!(140), dec!(145)]);
    }

    #[test]
    fn test_extract_chatter_is_no_signal() {
        let extractor = SignalExtractor::new();
        assert!(extractor
            .extract_default("Just chatting about the market today")
            .is_none());
        assert!(matches!(
            extractor.try_extract("Just chatting about the market today", "generic"),
            Ok(Extraction::NoSignal(NoSignalReason::MissingSymbol))
        ));
    }

    #[test]
    fn test_extract_negative_entry_rejected() {
        let extractor = SignalExtractor::new();
        assert!(extractor.extract_default("BTCUSDT LONG Entry: -100").is_none());
        assert!(matches!(
            extractor.try_extract("BTCUSDT LONG Entry: -100", "generic"),
            Ok(Extraction::NoSignal(NoSignalReason::NonPositiveEntry(_)))
        ));
    }

    #[test]
    fn test_extract_leverage_clamped() {
        let signal = SignalExtractor::new()
            .extract_default("BTCUSDT LONG Entry: 45000 Leverage: 250x")
            .unwrap();
        assert_eq!(signal.leverage, 100);
    }

    #[test]
    fn test_extract_oversized_leverage_clamped() {
        let signal = SignalExtractor::new()
            .extract_default("BTCUSDT LONG Entry: 45000 Leverage: 5000000000x")
            .unwrap();
        assert_eq!(signal.leverage, 100);

        let signal = SignalExtractor::new()
            .extract_default("BTCUSDT LONG Entry: 45000 99999999999999999999x")
            .unwrap();
        assert_eq!(signal.leverage, 100);
    }

    #[test]
    fn test_extract_leverage_after_direction_is_not_entry() {
        let extractor = SignalExtractor::new();
        assert!(extractor.extract_default("BTCUSDT LONG 10x SL: 44000").is_none());
        assert!(matches!(
            extractor.try_extract("BTCUSDT LONG 10x SL: 44000", "generic"),
            Ok(Extraction::NoSignal(NoSignalReason::MissingEntry))
        ));
    }

    #[test]
    fn test_extract_leverage_zero_raised_to_one() {
        let signal = SignalExtractor::new()
            .extract_default("BTCUSDT LONG Entry: 45000 0x")
            .unwrap();
        assert_eq!(signal.leverage, 1);
    }

    #[test]
    fn test_extract_custom_leverage_cap() {
        let config = ExtractorConfig {
            max_leverage: 20,
            default_source: "bybitpro".to_string(),
        };
        let extractor = SignalExtractor::from_config(&config);
        let signal = extractor
            .extract_default("BTCUSDT LONG Entry: 45000 50x")
            .unwrap();
        assert_eq!(signal.leverage, 20);
        assert_eq!(signal.source_tag, "bybitpro");
    }

    #[test]
    fn test_extract_zero_leverage_cap_is_raised() {
        let config = ExtractorConfig {
            max_leverage: 0,
            default_source: "generic".to_string(),
        };
        assert_eq!(SignalExtractor::from_config(&config).max_leverage(), 1);
    }

    #[test]
    fn test_extract_emoji_heavy_message() {
        let message = "🔥🔥 #AVAX 🟢 LONG 🔥🔥\n\
                       ➡️ Entry: 35.20\n\
                       🎯 TP1: 36.5\n\
                       🎯 TP2: 38\n\
                       ❌ SL: 33.9\n\
                       ⚡ Leverage: 10x";
        let signal = SignalExtractor::new().extract_default(message).unwrap();

        assert_eq!(signal.symbol, "AVAXUSDT");
        assert_eq!(signal.direction, Direction::Long);
        assert_eq!(signal.entry_price, dec!(35.20));
        assert_eq!(signal.stop_loss, Some(dec!(33.9)));
        assert_eq!(signal.take_profit_levels, vec![dec!(36.5), dec!(38)]);
        assert_eq!(signal.leverage, 10);
        assert_eq!(signal.confidence, dec!(1));
    }

    #[test]
    fn test_extract_confidence_minimal_signal() {
        let signal = SignalExtractor::new()
            .extract_default("BTCUSDT LONG Entry: 45000")
            .unwrap();
        assert_eq!(signal.confidence, dec!(0.5));
    }

    #[test]
    fn test_extractor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignalExtractor>();
    }
}
