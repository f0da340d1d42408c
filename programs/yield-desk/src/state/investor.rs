// state/investor.rs
use anchor_lang::prelude::*;

use crate::error::YieldDeskError;

#[account]
pub struct Investor {
    pub owner: Pubkey,
    /// Direct referrer, fixed at registration
    pub referrer: Option<Pubkey>,
    /// Set by the external KYC collaborator through the admin surface;
    /// deposits and withdrawal requests are gated on it
    pub kyc_verified: bool,
    /// Number of investments ever opened; doubles as the next PDA index
    pub investment_count: u64,
    pub total_invested: u64,
    pub created_at: i64,
    pub bump: u8,
}

impl Investor {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        33 + // referrer Option<Pubkey>
        1 + // kyc_verified
        8 + // investment_count
        8 + // total_invested
        8 + // created_at
        1 + // bump
        64; // spare

    /// Create new investor
    pub fn new(owner: Pubkey, referrer: Option<Pubkey>, created_at: i64, bump: u8) -> Self {
        Self {
            owner,
            referrer,
            kyc_verified: false,
            investment_count: 0,
            total_invested: 0,
            created_at,
            bump,
        }
    }

    pub fn can_open_investment(&self, max_investments: u64) -> bool {
        self.investment_count < max_investments
    }

    /// Record a newly funded investment and hand out its index
    pub fn record_investment(&mut self, amount: u64) -> Result<u64> {
        let index = self.investment_count;
        self.investment_count = self
            .investment_count
            .checked_add(1)
            .ok_or(YieldDeskError::MathOverflow)?;
        self.total_invested = self
            .total_invested
            .checked_add(amount)
            .ok_or(YieldDeskError::MathOverflow)?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_out_sequential_indices() {
        let mut investor = Investor::new(Pubkey::new_unique(), None, 0, 254);
        assert_eq!(investor.record_investment(10_000).unwrap(), 0);
        assert_eq!(investor.record_investment(20_000).unwrap(), 1);
        assert_eq!(investor.investment_count, 2);
        assert_eq!(investor.total_invested, 30_000);
    }

    #[test]
    fn enforces_investment_limit() {
        let mut investor = Investor::new(Pubkey::new_unique(), None, 0, 254);
        for _ in 0..3 {
            investor.record_investment(10_000).unwrap();
        }
        assert!(investor.can_open_investment(4));
        assert!(!investor.can_open_investment(3));
    }
}
