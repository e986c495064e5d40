//! Risk/reward calculation

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::signal::{Direction, ExtractedSignal};

/// Decimal places for ratios and percentages
const RATIO_DP: u32 = 2;
/// Decimal places for raw price distances
const PRICE_DP: u32 = 4;

/// Risk/reward figures for a signal
///
/// All zero when the stop loss is missing or on the profitable side of the
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskReward {
    /// Distance from entry to stop loss
    pub risk: Decimal,
    /// Distance from entry to the first take profit
    pub reward: Decimal,
    /// reward / risk
    pub ratio: Decimal,
    /// Risk as a percentage of the entry price
    pub risk_percent: Decimal,
}

impl RiskReward {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Calculate risk/reward against the stop loss and first take profit
    ///
    /// The first take profit is the lowest level. For a SHORT that is the
    /// furthest target, not the nearest one.
    pub fn calculate(signal: &ExtractedSignal) -> Self {
        let Some(stop_loss) = signal.stop_loss else {
            return Self::zero();
        };
        let entry = signal.entry_price;
        let first_target = signal.first_take_profit();

        let (risk, reward) = match signal.direction {
            Direction::Long => (
                entry - stop_loss,
                first_target.map_or(Decimal::ZERO, |tp| tp - entry),
            ),
            Direction::Short => (
                stop_loss - entry,
                first_target.map_or(Decimal::ZERO, |tp| entry - tp),
            ),
        };

        if risk <= Decimal::ZERO {
            return Self::zero();
        }

        let ratio = reward.checked_div(risk).unwrap_or(Decimal::ZERO);
        let risk_percent = risk
            .checked_div(entry)
            .and_then(|r| r.checked_mul(dec!(100)))
            .unwrap_or(Decimal::ZERO);

        Self {
            risk: risk.round_dp(PRICE_DP),
            reward: reward.round_dp(PRICE_DP),
            ratio: ratio.round_dp(RATIO_DP),
            risk_percent: risk_percent.round_dp(RATIO_DP),
        }
    }

    /// True when there is no usable risk figure
    pub fn is_zero(&self) -> bool {
        self.risk.is_zero()
    }
}
