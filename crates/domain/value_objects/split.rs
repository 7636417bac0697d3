use serde::Serialize;
use thiserror::Error;

/// Default branch share of every payment; headquarters keeps the rest.
pub const DEFAULT_BRANCH_SHARE_PERCENT: i64 = 90;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("split amount must be positive, got {0}")]
    NonPositiveAmount(i64),
    #[error("branch share percent must be within 0..=100, got {0}")]
    InvalidPercent(i64),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SplitAmounts {
    pub branch_amount: i64,
    pub hq_amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRatio {
    branch_percent: i64,
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self {
            branch_percent: DEFAULT_BRANCH_SHARE_PERCENT,
        }
    }
}

impl SplitRatio {
    pub fn new(branch_percent: i64) -> Result<Self, SplitError> {
        if !(0..=100).contains(&branch_percent) {
            return Err(SplitError::InvalidPercent(branch_percent));
        }
        Ok(Self { branch_percent })
    }

    pub fn branch_percent(&self) -> i64 {
        self.branch_percent
    }

    pub fn hq_percent(&self) -> i64 {
        100 - self.branch_percent
    }

    /// Splits `amount` (smallest currency unit) between branch and HQ.
    /// The branch share rounds down; the remainder stays with HQ, so the
    /// two always sum back to `amount`.
    pub fn split(&self, amount: i64) -> Result<SplitAmounts, SplitError> {
        if amount <= 0 {
            return Err(SplitError::NonPositiveAmount(amount));
        }

        let branch_amount = amount * self.branch_percent / 100;
        Ok(SplitAmounts {
            branch_amount,
            hq_amount: amount - branch_amount,
        })
    }
}
