// state/referral.rs
use anchor_lang::prelude::*;

use crate::error::YieldDeskError;

/// One referrer→referee link. Created when the referee's first investment is
/// credited, accumulated on every later one, never deleted.
#[account]
pub struct ReferralEdge {
    pub referrer: Pubkey,
    pub referee: Pubkey,
    /// 1 = direct referee, 2 = referee-of-referee
    pub level: u8,
    /// Everything the referee ever invested (USD cents)
    pub invested_amount: u64,
    /// Referee registration time; stable rank ordering for level-1 pricing
    pub joined_at: i64,
    pub bump: u8,
}

impl ReferralEdge {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // referrer
        32 + // referee
        1 + // level
        8 + // invested_amount
        8 + // joined_at
        1 + // bump
        32; // spare

    pub fn is_initialized(&self) -> bool {
        self.referrer != Pubkey::default()
    }

    /// Accumulate a newly credited investment
    pub fn add_invested(&mut self, amount: u64) -> Result<()> {
        self.invested_amount = self
            .invested_amount
            .checked_add(amount)
            .ok_or(YieldDeskError::MathOverflow)?;
        Ok(())
    }
}

/// A commission credited for one funded investment, frozen at credit time.
/// The referral-bonus withdrawal kind pays exactly one of these.
#[account]
pub struct ReferralEarning {
    pub referrer: Pubkey,
    pub referee: Pubkey,
    pub investment: Pubkey,
    pub level: u8,
    /// Whole-percent commission rate applied at credit time
    pub percent: u8,
    pub amount: u64,
    pub paid: bool,
    pub created_at: i64,
    pub bump: u8,
}

impl ReferralEarning {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // referrer
        32 + // referee
        32 + // investment
        1 + // level
        1 + // percent
        8 + // amount
        1 + // paid
        8 + // created_at
        1 + // bump
        32; // spare

    /// Mark this earning as paid out. Errors if it already was.
    pub fn mark_paid(&mut self) -> Result<()> {
        if self.paid {
            return Err(YieldDeskError::EarningAlreadyPaid.into());
        }
        self.paid = true;
        Ok(())
    }
}
