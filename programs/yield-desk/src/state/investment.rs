// state/investment.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::utils::calculations;
use crate::AccrualSnapshotData;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageTier {
    Starter = 0,
    Advanced = 1,
    Pro = 2,
    Elite = 3,
}

impl PackageTier {
    /// Get the array index for this package
    pub fn to_index(&self) -> usize {
        match self {
            PackageTier::Starter => 0,
            PackageTier::Advanced => 1,
            PackageTier::Pro => 2,
            PackageTier::Elite => 3,
        }
    }

    /// Create package tier from index
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PackageTier::Starter),
            1 => Some(PackageTier::Advanced),
            2 => Some(PackageTier::Pro),
            3 => Some(PackageTier::Elite),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PackageTier::Starter => "Starter",
            PackageTier::Advanced => "Advanced",
            PackageTier::Pro => "Pro",
            PackageTier::Elite => "Elite",
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvestmentStatus {
    Active,
    Completed,
    CancelledEarly,
}

#[account]
pub struct Investment {
    pub owner: Pubkey,
    /// Position within the owner's investor account; part of the PDA seeds
    pub index: u64,
    /// Principal in USD cents
    pub principal: u64,
    pub tier: PackageTier,
    /// Base monthly rate of the resolved package (basis points)
    pub base_rate_bps: u16,
    pub duration_months: u8,
    /// Extra monthly rate for the chosen lock-in (basis points)
    pub duration_bonus_bps: u16,
    /// One-time cash bonus granted at creation (USD cents); settlement is
    /// handled off-engine
    pub cash_bonus: u64,
    pub started_at: i64,
    /// Test-only clock skew in whole days. Per investment on purpose: an
    /// admin poking one row must never move any other investment's clock.
    pub simulated_offset_days: i64,
    /// Profit banked before the last principal or rate change, so a
    /// reinvestment never reprices already-earned days
    pub accrued_carry: u64,
    /// Accrual days already folded into the carry
    pub banked_days: i64,
    /// Profit consumed by approved partial withdrawals and reinvestments.
    /// Never decreases.
    pub withdrawn_profit: u64,
    pub status: InvestmentStatus,
    /// One-pending-request guard, flipped in the same transaction as the
    /// request account insert
    pub pending_request: bool,
    /// Requests ever opened against this investment; next request PDA index
    pub request_count: u64,
    pub bump: u8,
}

impl Investment {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        8 + // index
        8 + // principal
        1 + // tier
        2 + // base_rate_bps
        1 + // duration_months
        2 + // duration_bonus_bps
        8 + // cash_bonus
        8 + // started_at
        8 + // simulated_offset_days
        8 + // accrued_carry
        8 + // banked_days
        8 + // withdrawn_profit
        1 + // status
        1 + // pending_request
        8 + // request_count
        1 + // bump
        64; // spare

    /// Create a new active investment
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner: Pubkey,
        index: u64,
        principal: u64,
        tier: PackageTier,
        base_rate_bps: u16,
        duration_months: u8,
        duration_bonus_bps: u16,
        cash_bonus: u64,
        started_at: i64,
        bump: u8,
    ) -> Self {
        Self {
            owner,
            index,
            principal,
            tier,
            base_rate_bps,
            duration_months,
            duration_bonus_bps,
            cash_bonus,
            started_at,
            simulated_offset_days: 0,
            accrued_carry: 0,
            banked_days: 0,
            withdrawn_profit: 0,
            status: InvestmentStatus::Active,
            pending_request: false,
            request_count: 0,
            bump,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == InvestmentStatus::Active
    }

    /// Combined monthly rate: package base + duration bonus
    pub fn effective_rate_bps(&self) -> u16 {
        self.base_rate_bps.saturating_add(self.duration_bonus_bps)
    }

    /// Days until a full withdrawal becomes legal
    pub fn maturity_days(&self) -> i64 {
        self.duration_months as i64 * DAYS_PER_MONTH
    }

    /// Accrual days elapsed since the start, clamped to `[0, maturity]`
    pub fn elapsed_days(&self, now: i64) -> i64 {
        calculations::elapsed_days(
            self.started_at,
            now,
            self.simulated_offset_days,
            self.maturity_days(),
        )
    }

    pub fn is_mature(&self, now: i64) -> bool {
        self.elapsed_days(now) >= self.maturity_days()
    }

    /// Total profit earned up to `now`, before any withdrawal: the banked
    /// carry plus the current principal accruing over the unbanked days
    pub fn accrued_profit(&self, now: i64) -> u64 {
        let segment_days = (self.elapsed_days(now) - self.banked_days).max(0);
        self.accrued_carry.saturating_add(calculations::profit_for_days(
            self.principal,
            self.effective_rate_bps(),
            segment_days,
        ))
    }

    /// Accrued profit not yet withdrawn or reinvested; the ceiling for a
    /// partial withdrawal or reinvestment
    pub fn available_profit(&self, now: i64) -> u64 {
        calculations::available_profit(self.accrued_profit(now), self.withdrawn_profit)
    }

    /// Projected payout at maturity with the current principal and rate
    pub fn expected_return(&self) -> u64 {
        let remaining_days = (self.maturity_days() - self.banked_days).max(0);
        self.accrued_carry
            .saturating_add(self.principal)
            .saturating_add(calculations::profit_for_days(
                self.principal,
                self.effective_rate_bps(),
                remaining_days,
            ))
    }

    pub fn snapshot(&self, now: i64) -> AccrualSnapshotData {
        AccrualSnapshotData {
            owner: self.owner,
            principal: self.principal,
            accrued_profit: self.accrued_profit(now),
            available_profit: self.available_profit(now),
            elapsed_days: self.elapsed_days(now),
            is_mature: self.is_mature(now),
            expected_return: self.expected_return(),
        }
    }

    /// Fold the current segment's profit into the carry before principal or
    /// rate changes, so already-earned days keep their old pricing
    fn bank_accrual(&mut self, now: i64) -> Result<()> {
        let accrued = self.accrued_profit(now);
        self.accrued_carry = accrued;
        self.banked_days = self.elapsed_days(now);
        Ok(())
    }

    /// Open a request slot: fails if one is already pending, otherwise flips
    /// the guard and hands out the next request index
    pub fn begin_request(&mut self) -> Result<u64> {
        if self.pending_request {
            return Err(YieldDeskError::PendingRequestExists.into());
        }
        let index = self.request_count;
        self.request_count = self
            .request_count
            .checked_add(1)
            .ok_or(YieldDeskError::MathOverflow)?;
        self.pending_request = true;
        Ok(index)
    }

    /// Release the guard once the pending request reaches a terminal status
    pub fn clear_pending_request(&mut self) {
        self.pending_request = false;
    }

    /// Consume profit through an approved partial withdrawal
    pub fn apply_partial_withdrawal(&mut self, amount: u64, now: i64) -> Result<()> {
        if !self.is_active() {
            return Err(YieldDeskError::InvestmentNotActive.into());
        }
        if amount > self.available_profit(now) {
            return Err(YieldDeskError::InsufficientProfit.into());
        }
        self.withdrawn_profit = self
            .withdrawn_profit
            .checked_add(amount)
            .ok_or(YieldDeskError::MathOverflow)?;
        Ok(())
    }

    /// Close out early: principal net of withdrawn profit comes back, the
    /// accrued remainder is forfeited
    pub fn apply_early_withdrawal(&mut self) -> Result<u64> {
        if !self.is_active() {
            return Err(YieldDeskError::InvestmentNotActive.into());
        }
        let payout = calculations::early_exit_payout(self.principal, self.withdrawn_profit);
        self.status = InvestmentStatus::CancelledEarly;
        Ok(payout)
    }

    /// Close out at maturity: principal plus everything still available
    pub fn apply_full_withdrawal(&mut self, now: i64) -> Result<u64> {
        if !self.is_active() {
            return Err(YieldDeskError::InvestmentNotActive.into());
        }
        if !self.is_mature(now) {
            return Err(YieldDeskError::NotMatured.into());
        }
        let available = self.available_profit(now);
        let payout = self
            .principal
            .checked_add(available)
            .ok_or(YieldDeskError::MathOverflow)?;
        self.withdrawn_profit = self
            .withdrawn_profit
            .checked_add(available)
            .ok_or(YieldDeskError::MathOverflow)?;
        self.status = InvestmentStatus::Completed;
        Ok(payout)
    }

    /// Move available profit into principal. The amount is booked as
    /// withdrawn and re-deposited in one step, so past profit is neither
    /// double-counted nor lost; the segment earned so far is banked first so
    /// the bigger principal only earns from here on. The caller re-resolves
    /// the package against the new principal.
    pub fn apply_reinvestment(&mut self, amount: u64, now: i64) -> Result<()> {
        if !self.is_active() {
            return Err(YieldDeskError::InvestmentNotActive.into());
        }
        if self.pending_request {
            return Err(YieldDeskError::PendingRequestExists.into());
        }
        if amount == 0 {
            return Err(YieldDeskError::InvalidAmount.into());
        }
        if amount > self.available_profit(now) {
            return Err(YieldDeskError::InsufficientProfit.into());
        }
        self.bank_accrual(now)?;
        self.withdrawn_profit = self
            .withdrawn_profit
            .checked_add(amount)
            .ok_or(YieldDeskError::MathOverflow)?;
        self.principal = self
            .principal
            .checked_add(amount)
            .ok_or(YieldDeskError::MathOverflow)?;
        Ok(())
    }

    /// Adopt a re-resolved package after reinvestment. Returns true when the
    /// tier actually changed. Duration and its bonus are untouched.
    pub fn adopt_package(&mut self, tier: PackageTier, base_rate_bps: u16) -> bool {
        if tier == self.tier {
            return false;
        }
        self.tier = tier;
        self.base_rate_bps = base_rate_bps;
        true
    }

    /// Shift this investment's test clock. Additive, never below zero.
    pub fn add_simulated_days(&mut self, extra_days: i64) -> Result<()> {
        let new_offset = self
            .simulated_offset_days
            .checked_add(extra_days)
            .ok_or(YieldDeskError::MathOverflow)?;
        if new_offset < 0 {
            return Err(YieldDeskError::InvalidSimulatedOffset.into());
        }
        self.simulated_offset_days = new_offset;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_700_000_000;

    fn advanced_1000() -> Investment {
        // $1,000 Advanced, 3 months, no duration bonus
        Investment::new(
            Pubkey::new_unique(),
            0,
            100_000,
            PackageTier::Advanced,
            1700,
            3,
            0,
            0,
            START,
            254,
        )
    }

    fn after_days(days: i64) -> i64 {
        START + days * SECONDS_PER_DAY
    }

    #[test]
    fn accrues_170_dollars_in_30_days() {
        let inv = advanced_1000();
        assert_eq!(inv.accrued_profit(after_days(30)), 17_000);
        assert_eq!(inv.available_profit(after_days(30)), 17_000);
    }

    #[test]
    fn accrual_stops_at_maturity() {
        let inv = advanced_1000();
        let at_maturity = inv.accrued_profit(after_days(90));
        assert_eq!(inv.accrued_profit(after_days(200)), at_maturity);
        assert!(inv.is_mature(after_days(90)));
        assert!(!inv.is_mature(after_days(89)));
    }

    #[test]
    fn partial_withdrawal_consumes_available_profit() {
        let mut inv = advanced_1000();
        let now = after_days(30);
        inv.apply_partial_withdrawal(5_000, now).unwrap();
        assert_eq!(inv.withdrawn_profit, 5_000);
        assert_eq!(inv.available_profit(now), 12_000);
        assert!(inv.is_active());
    }

    #[test]
    fn partial_withdrawal_cannot_overdraw() {
        let mut inv = advanced_1000();
        let now = after_days(30);
        let err = inv.apply_partial_withdrawal(17_001, now).unwrap_err();
        assert_eq!(err, YieldDeskError::InsufficientProfit.into());
        assert_eq!(inv.withdrawn_profit, 0);
    }

    #[test]
    fn early_exit_returns_principal_minus_withdrawn() {
        let mut inv = advanced_1000();
        inv.apply_partial_withdrawal(5_000, after_days(30)).unwrap();
        let payout = inv.apply_early_withdrawal().unwrap();
        assert_eq!(payout, 95_000);
        assert_eq!(inv.status, InvestmentStatus::CancelledEarly);
    }

    #[test]
    fn full_withdrawal_requires_maturity() {
        let mut inv = advanced_1000();
        let err = inv.apply_full_withdrawal(after_days(60)).unwrap_err();
        assert_eq!(err, YieldDeskError::NotMatured.into());

        let payout = inv.apply_full_withdrawal(after_days(90)).unwrap();
        // $1,000 principal + $510 profit over 90 days
        assert_eq!(payout, 151_000);
        assert_eq!(inv.status, InvestmentStatus::Completed);
        assert_eq!(inv.withdrawn_profit, inv.accrued_profit(after_days(90)));
    }

    #[test]
    fn terminal_states_accept_no_further_mutation() {
        let mut inv = advanced_1000();
        inv.apply_full_withdrawal(after_days(90)).unwrap();

        assert!(inv.apply_partial_withdrawal(1, after_days(91)).is_err());
        assert!(inv.apply_early_withdrawal().is_err());
        assert!(inv.apply_reinvestment(1, after_days(91)).is_err());
    }

    #[test]
    fn reinvestment_moves_profit_into_principal() {
        let mut inv = advanced_1000();
        let now = after_days(30);
        let available_before = inv.available_profit(now);

        inv.apply_reinvestment(10_000, now).unwrap();

        assert_eq!(inv.principal, 110_000);
        assert_eq!(inv.withdrawn_profit, 10_000);
        assert_eq!(inv.available_profit(now), available_before - 10_000);
        assert_eq!(inv.started_at, START);
        assert!(inv.is_active());
    }

    #[test]
    fn reinvestment_does_not_reprice_earned_days() {
        let mut inv = advanced_1000();
        let now = after_days(30);
        let accrued_before = inv.accrued_profit(now);

        inv.apply_reinvestment(10_000, now).unwrap();

        // the first 30 days stay priced on the old principal
        assert_eq!(inv.accrued_profit(now), accrued_before);
        assert_eq!(inv.accrued_carry, accrued_before);
        assert_eq!(inv.banked_days, 30);

        // from here on, the bigger principal earns: 110,000 * 17% / 30 per day
        let next_day = inv.accrued_profit(after_days(31));
        assert_eq!(next_day - accrued_before, 110_000 * 1700 / 10_000 / 30);
    }

    #[test]
    fn reinvestment_blocked_while_request_pending() {
        let mut inv = advanced_1000();
        inv.begin_request().unwrap();
        let err = inv.apply_reinvestment(1_000, after_days(30)).unwrap_err();
        assert_eq!(err, YieldDeskError::PendingRequestExists.into());
    }

    #[test]
    fn adopt_package_reports_upgrades_only() {
        let mut inv = advanced_1000();
        assert!(!inv.adopt_package(PackageTier::Advanced, 1700));
        assert!(inv.adopt_package(PackageTier::Pro, 2000));
        assert_eq!(inv.base_rate_bps, 2000);
        assert_eq!(inv.tier, PackageTier::Pro);
    }

    #[test]
    fn one_pending_request_at_a_time() {
        let mut inv = advanced_1000();
        assert_eq!(inv.begin_request().unwrap(), 0);
        assert!(inv.begin_request().is_err());

        inv.clear_pending_request();
        assert_eq!(inv.begin_request().unwrap(), 1);
    }

    #[test]
    fn simulated_offset_is_per_investment() {
        let mut a = advanced_1000();
        let b = advanced_1000();

        a.add_simulated_days(30).unwrap();
        assert_eq!(a.elapsed_days(START), 30);
        assert_eq!(b.elapsed_days(START), 0);
    }

    #[test]
    fn simulated_offset_cannot_go_negative() {
        let mut inv = advanced_1000();
        inv.add_simulated_days(10).unwrap();
        assert!(inv.add_simulated_days(-20).is_err());
        inv.add_simulated_days(-10).unwrap();
        assert_eq!(inv.simulated_offset_days, 0);
    }

    #[test]
    fn withdrawn_never_exceeds_accrued() {
        let mut inv = advanced_1000();
        let now = after_days(45);
        inv.apply_partial_withdrawal(10_000, now).unwrap();
        inv.apply_reinvestment(5_000, now).unwrap();
        assert!(inv.withdrawn_profit <= inv.accrued_profit(now));
    }

    #[test]
    fn expected_return_tracks_reinvestment() {
        let mut inv = advanced_1000();
        // untouched: $1,000 + 90 days at 17%/month
        assert_eq!(inv.expected_return(), 151_000);

        let now = after_days(30);
        inv.apply_reinvestment(17_000, now).unwrap();
        // $170 banked + $1,170 principal + 60 remaining days on the new base
        let future = 117_000u64 * 1700 * 60 / 10_000 / 30;
        assert_eq!(inv.expected_return(), 17_000 + 117_000 + future);
    }
}
