//! Cross-field validation
//!
//! Only presence and positivity are checked. Where stop loss and targets sit
//! relative to the entry is not validated here.

use rust_decimal::Decimal;

use super::fields::ExtractedFields;
use super::types::NoSignalReason;
use crate::signal::Direction;

/// Fields every signal must carry
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredFields {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: Decimal,
}

/// Decide whether extracted fields make a usable signal
pub fn validate(fields: &ExtractedFields) -> Result<RequiredFields, NoSignalReason> {
    let symbol = fields.symbol.clone().ok_or(NoSignalReason::MissingSymbol)?;
    let direction = fields.direction.ok_or(NoSignalReason::MissingDirection)?;
    let entry_price = fields.entry_price.ok_or(NoSignalReason::MissingEntry)?;

    if entry_price <= Decimal::ZERO {
        return Err(NoSignalReason::NonPositiveEntry(entry_price));
    }

    if let Some(stop_loss) = fields.stop_loss {
        if stop_loss <= Decimal::ZERO {
            return Err(NoSignalReason::NonPositiveStopLoss(stop_loss));
        }
    }

    Ok(RequiredFields {
        symbol,
        direction,
        entry_price,
    })
}
