//! Reasons a farm action can be refused.

use thiserror::Error;

use super::catalog::CropId;

/// A rejected engine operation. State is untouched whenever one of these is
/// returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FarmError {
    #[error("position ({row}, {col}) is outside the farm")]
    InvalidPosition { row: i64, col: i64 },
    #[error("plot is already occupied")]
    PlotOccupied,
    #[error("no crop planted here")]
    NoCropPlanted,
    #[error("crop is not ready yet ({days_left} day(s) left)")]
    CropNotReady { days_left: u32 },
    #[error("no {crop} seeds in inventory")]
    NoSeeds { crop: CropId },
    #[error("not enough energy")]
    InsufficientEnergy,
    #[error("insufficient funds: need ${cost}, have ${money}")]
    InsufficientFunds { cost: u64, money: u64 },
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("unknown crop '{0}'")]
    UnknownCrop(CropId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funds_message_prefix() {
        let e = FarmError::InsufficientFunds { cost: 120, money: 50 };
        let msg = e.to_string();
        assert!(msg.starts_with("insufficient funds"));
        assert!(msg.contains("$120"));
    }

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            FarmError::InvalidPosition { row: 7, col: 0 }.to_string(),
            "position (7, 0) is outside the farm"
        );
        assert_eq!(
            FarmError::UnknownCrop(CropId::new("kale")).to_string(),
            "unknown crop 'kale'"
        );
    }
}
