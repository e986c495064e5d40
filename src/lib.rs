//! signal-scraper: trading signal extraction from Telegram chat messages
//!
//! This library provides the core components for:
//! - Normalizing emoji-laden, inconsistently formatted chat text
//! - Extracting symbol, direction, entry, stop loss, targets and leverage
//!   through ordered fallback pattern tables
//! - Validating extracted fields into a signal or "no signal"
//! - Risk/reward figures and signal quality assessment
//! - Post-extraction filtering with per-source rate limits
//! - Logging and metrics

pub mod cli;
pub mod config;
pub mod extract;
pub mod risk;
pub mod signal;
pub mod telemetry;

pub use extract::SignalExtractor;
pub use signal::{Direction, ExtractedSignal};
