// state/engine.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::state::investment::PackageTier;

#[account]
pub struct EngineConfig {
    /// Admin authority who can update config
    pub authority: Pubkey,

    /// Package lower bounds (USD cents), ascending
    pub tier_min_amounts: [u64; PACKAGE_TIER_COUNT],

    /// Package upper bounds (USD cents, inclusive)
    pub tier_max_amounts: [u64; PACKAGE_TIER_COUNT],

    /// Base monthly rate per package (basis points)
    pub tier_monthly_rates: [u16; PACKAGE_TIER_COUNT],

    /// Allowed lock-in durations in months, ascending
    pub duration_choices: [u8; DURATION_CHOICE_COUNT],

    /// Monthly-rate bonus per duration choice (basis points)
    pub duration_rate_bonuses: [u16; DURATION_CHOICE_COUNT],

    /// Cash bonus bracket thresholds and payouts (USD cents)
    pub cash_bonus_lower_threshold: u64,
    pub cash_bonus_upper_threshold: u64,
    pub cash_bonus_lower: u64,
    pub cash_bonus_upper: u64,

    /// Maximum investments per investor
    pub max_investments_per_investor: u64,

    /// Whether new registrations are allowed
    pub registrations_open: bool,

    /// Bump seed for PDA
    pub bump: u8,
}

impl EngineConfig {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        8 * PACKAGE_TIER_COUNT + // tier_min_amounts
        8 * PACKAGE_TIER_COUNT + // tier_max_amounts
        2 * PACKAGE_TIER_COUNT + // tier_monthly_rates
        DURATION_CHOICE_COUNT + // duration_choices
        2 * DURATION_CHOICE_COUNT + // duration_rate_bonuses
        8 + 8 + 8 + 8 + // cash bonus brackets
        8 + // max_investments_per_investor
        1 + // registrations_open
        1 + // bump
        64; // spare

    /// Create new config with default values
    pub fn new(authority: Pubkey, bump: u8) -> Self {
        Self {
            authority,
            tier_min_amounts: TIER_MIN_AMOUNTS,
            tier_max_amounts: TIER_MAX_AMOUNTS,
            tier_monthly_rates: TIER_MONTHLY_RATES,
            duration_choices: DURATION_CHOICES,
            duration_rate_bonuses: DURATION_RATE_BONUSES,
            cash_bonus_lower_threshold: CASH_BONUS_LOWER_THRESHOLD,
            cash_bonus_upper_threshold: CASH_BONUS_UPPER_THRESHOLD,
            cash_bonus_lower: CASH_BONUS_LOWER,
            cash_bonus_upper: CASH_BONUS_UPPER,
            max_investments_per_investor: MAX_INVESTMENTS_PER_INVESTOR,
            registrations_open: true,
            bump,
        }
    }

    /// Resolve the package a deposit amount belongs to. Lower bounds are
    /// inclusive: an amount equal to a package's minimum belongs to that
    /// package, not the one below.
    pub fn resolve_package(&self, amount: u64) -> Result<(PackageTier, u16)> {
        if amount < self.tier_min_amounts[0] {
            return Err(YieldDeskError::AmountOutOfRange.into());
        }
        if amount > self.tier_max_amounts[PACKAGE_TIER_COUNT - 1] {
            return Err(YieldDeskError::AmountOutOfRange.into());
        }

        let mut resolved = 0usize;
        for (i, min) in self.tier_min_amounts.iter().enumerate() {
            if amount >= *min {
                resolved = i;
            }
        }

        let tier = PackageTier::from_index(resolved as u8).ok_or(YieldDeskError::AmountOutOfRange)?;
        Ok((tier, self.tier_monthly_rates[resolved]))
    }

    /// Monthly-rate bonus for a lock-in duration
    pub fn duration_bonus_bps(&self, duration_months: u8) -> Result<u16> {
        for (i, months) in self.duration_choices.iter().enumerate() {
            if *months == duration_months {
                return Ok(self.duration_rate_bonuses[i]);
            }
        }
        Err(YieldDeskError::InvalidDuration.into())
    }

    /// One-time cash bonus awarded at creation. The minimum duration never
    /// pays a bonus; otherwise the deposit's bracket decides the flat amount.
    pub fn cash_bonus_for(&self, duration_months: u8, amount: u64) -> u64 {
        if duration_months == self.duration_choices[0] {
            return 0;
        }
        if amount >= self.cash_bonus_upper_threshold {
            self.cash_bonus_upper
        } else if amount >= self.cash_bonus_lower_threshold {
            self.cash_bonus_lower
        } else {
            0
        }
    }
}

#[account]
pub struct EngineState {
    pub authority: Pubkey,
    /// Sole holder of the approve/reject privilege. Kept separate from
    /// authority so it can become a role later.
    pub approver: Pubkey,
    pub total_investors: u64,
    pub total_investments: u64,
    pub total_invested: u64,
    pub total_withdrawn: u64,
    pub total_referral_credited: u64,
    pub total_referral_paid: u64,
    pub is_paused: bool,
    pub created_at: i64,
    pub bump: u8,
}

impl EngineState {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        32 + // approver
        8 + // total_investors
        8 + // total_investments
        8 + // total_invested
        8 + // total_withdrawn
        8 + // total_referral_credited
        8 + // total_referral_paid
        1 + // is_paused
        8 + // created_at
        1 + // bump
        64; // spare

    /// Create new engine state
    pub fn new(authority: Pubkey, approver: Pubkey, created_at: i64, bump: u8) -> Self {
        Self {
            authority,
            approver,
            total_investors: 0,
            total_investments: 0,
            total_invested: 0,
            total_withdrawn: 0,
            total_referral_credited: 0,
            total_referral_paid: 0,
            is_paused: false,
            created_at,
            bump,
        }
    }

    /// Add new investor
    pub fn add_investor(&mut self) {
        self.total_investors += 1;
    }

    /// Add investment
    pub fn add_investment(&mut self, amount: u64) {
        self.total_investments += 1;
        self.total_invested = self.total_invested.saturating_add(amount);
    }

    /// Add approved payout
    pub fn add_withdrawal(&mut self, amount: u64) {
        self.total_withdrawn = self.total_withdrawn.saturating_add(amount);
    }

    /// Add credited referral commission
    pub fn add_referral_credit(&mut self, amount: u64) {
        self.total_referral_credited = self.total_referral_credited.saturating_add(amount);
    }

    /// Add paid-out referral commission
    pub fn add_referral_payment(&mut self, amount: u64) {
        self.total_referral_paid = self.total_referral_paid.saturating_add(amount);
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::new(Pubkey::new_unique(), 255)
    }

    #[test]
    fn resolves_each_package_at_its_lower_bound() {
        let cfg = config();
        assert_eq!(cfg.resolve_package(10_000).unwrap().0, PackageTier::Starter);
        assert_eq!(cfg.resolve_package(100_000).unwrap().0, PackageTier::Advanced);
        assert_eq!(cfg.resolve_package(300_000).unwrap().0, PackageTier::Pro);
        assert_eq!(cfg.resolve_package(600_000).unwrap().0, PackageTier::Elite);
    }

    #[test]
    fn resolves_rates_with_amounts() {
        let cfg = config();
        let (tier, rate) = cfg.resolve_package(150_000).unwrap();
        assert_eq!(tier, PackageTier::Advanced);
        assert_eq!(rate, 1700);
    }

    #[test]
    fn one_cent_below_a_bound_stays_in_the_lower_package() {
        let cfg = config();
        assert_eq!(cfg.resolve_package(99_999).unwrap().0, PackageTier::Starter);
        assert_eq!(cfg.resolve_package(599_999).unwrap().0, PackageTier::Pro);
    }

    #[test]
    fn rejects_amounts_outside_all_packages() {
        let cfg = config();
        assert!(cfg.resolve_package(9_999).is_err());
        assert!(cfg.resolve_package(10_000_001).is_err());
    }

    #[test]
    fn minimum_duration_carries_no_bonus() {
        let cfg = config();
        assert_eq!(cfg.duration_bonus_bps(3).unwrap(), 0);
        assert_eq!(cfg.duration_bonus_bps(6).unwrap(), 150);
        assert_eq!(cfg.duration_bonus_bps(12).unwrap(), 300);
        assert!(cfg.duration_bonus_bps(4).is_err());
    }

    #[test]
    fn cash_bonus_bracket_matrix() {
        let cfg = config();
        // minimum duration never pays
        assert_eq!(cfg.cash_bonus_for(3, 200_000), 0);
        // below the lower bracket never pays
        assert_eq!(cfg.cash_bonus_for(6, 40_000), 0);
        // $500..$1000 pays the smaller bonus
        assert_eq!(cfg.cash_bonus_for(6, 50_000), 20_000);
        assert_eq!(cfg.cash_bonus_for(12, 99_999), 20_000);
        // $1000 and up pays the larger bonus
        assert_eq!(cfg.cash_bonus_for(6, 100_000), 50_000);
        assert_eq!(cfg.cash_bonus_for(12, 600_000), 50_000);
    }
}
