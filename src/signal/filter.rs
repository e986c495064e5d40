//! Signal filtering
//!
//! Gate applied after extraction, before a signal is forwarded downstream.

use super::quality::{assess_levels, LevelIssue};
use super::ExtractedSignal;
use crate::config::FilterConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of applying filters to a signal
#[derive(Debug, Clone)]
pub enum FilterResult {
    /// Signal passed all filters
    Pass,
    /// Signal rejected
    Reject(RejectReason),
}

impl FilterResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, FilterResult::Pass)
    }
}

/// Reason for signal rejection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Source tag is not in the supported list
    UnsupportedSource(String),
    /// Confidence below minimum threshold
    ConfidenceTooLow(Decimal),
    /// Source already forwarded this many signals in the window
    RateLimited(usize),
    /// Stop loss or targets on the wrong side of entry
    InconsistentLevels(Vec<LevelIssue>),
}

impl RejectReason {
    /// Short label for metrics
    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::UnsupportedSource(_) => "unsupported_source",
            RejectReason::ConfidenceTooLow(_) => "confidence_too_low",
            RejectReason::RateLimited(_) => "rate_limited",
            RejectReason::InconsistentLevels(_) => "inconsistent_levels",
        }
    }
}

/// Signal filter chain
pub struct SignalFilter {
    config: FilterConfig,
}

impl SignalFilter {
    /// Create a new signal filter with given configuration
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Apply all filters to a signal
    ///
    /// `recent_count` is the number of signals already forwarded for the
    /// signal's source within the rate-limit window.
    pub fn apply(&self, signal: &ExtractedSignal, recent_count: usize) -> FilterResult {
        // Check source
        if !self.is_supported_source(&signal.source_tag) {
            return FilterResult::Reject(RejectReason::UnsupportedSource(
                signal.source_tag.clone(),
            ));
        }

        // Check confidence
        if signal.confidence < self.config.min_confidence {
            return FilterResult::Reject(RejectReason::ConfidenceTooLow(signal.confidence));
        }

        // Check rate limit
        if let Some(max) = self.config.max_signals_per_hour {
            if recent_count >= max {
                return FilterResult::Reject(RejectReason::RateLimited(recent_count));
            }
        }

        // Check level consistency
        if self.config.reject_inconsistent_levels {
            let issues = assess_levels(signal);
            if !issues.is_empty() {
                return FilterResult::Reject(RejectReason::InconsistentLevels(issues));
            }
        }

        FilterResult::Pass
    }

    /// An empty supported list accepts every source
    pub fn is_supported_source(&self, source: &str) -> bool {
        self.config.supported_sources.is_empty()
            || self
                .config
                .supported_sources
                .iter()
                .any(|s| s.eq_ignore_ascii_case(source))
    }
}
