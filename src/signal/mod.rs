//! Signal module
//!
//! Extracted signal types, quality assessment and post-extraction filtering

mod filter;
mod limits;
mod quality;
mod types;

pub use filter::{FilterResult, RejectReason, SignalFilter};
pub use limits::SignalRateLimiter;
pub use quality::{assess_levels, completeness_confidence, LevelIssue, SIGNAL_FIELDS};
pub use types::{Direction, ExtractedSignal, SignalSubmission};
