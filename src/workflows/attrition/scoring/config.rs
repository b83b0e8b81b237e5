use serde::Serialize;

/// Raised when configured breakpoints do not partition [0, 100].
#[derive(Debug, thiserror::Error)]
pub enum ThresholdError {
    #[error("high threshold {high} must exceed medium threshold {medium}")]
    Inverted { high: u8, medium: u8 },
    #[error("medium threshold must be above zero")]
    MediumAtFloor,
    #[error("high threshold {0} must not exceed 100")]
    AboveCeiling(u8),
}

/// Ordered breakpoints splitting [0, 100] into three contiguous action bands.
///
/// `low` is pinned to zero; validation happens once at construction so the
/// engine can treat the values as trusted for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskThresholds {
    high: u8,
    medium: u8,
    low: u8,
}

impl RiskThresholds {
    pub fn new(high: u8, medium: u8) -> Result<Self, ThresholdError> {
        if high > 100 {
            return Err(ThresholdError::AboveCeiling(high));
        }
        if medium == 0 {
            return Err(ThresholdError::MediumAtFloor);
        }
        if high <= medium {
            return Err(ThresholdError::Inverted { high, medium });
        }
        Ok(Self {
            high,
            medium,
            low: 0,
        })
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn medium(&self) -> u8 {
        self.medium
    }

    pub fn low(&self) -> u8 {
        self.low
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: 70,
            medium: 40,
            low: 0,
        }
    }
}
