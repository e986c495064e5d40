//! Risk module
//!
//! Risk/reward figures for extracted signals

mod reward;

pub use reward::RiskReward;
