// utils/calculations.rs
use anchor_lang::prelude::*;

use crate::constants::*;

/// Whole accrual days elapsed for an investment, clamped to `[0, maturity]`.
/// The simulated offset is a per-investment test knob layered on top of real
/// elapsed time; profit never accrues past maturity.
pub fn elapsed_days(started_at: i64, now: i64, simulated_offset_days: i64, maturity_days: i64) -> i64 {
    let real_days = (now - started_at).div_euclid(SECONDS_PER_DAY);
    let total = real_days.saturating_add(simulated_offset_days);
    total.clamp(0, maturity_days)
}

/// Profit accrued over `days` at a monthly rate given in basis points.
/// Daily rate = monthly rate / 30.
pub fn profit_for_days(principal: u64, monthly_rate_bps: u16, days: i64) -> u64 {
    if days <= 0 {
        return 0;
    }
    let profit = principal as u128 * monthly_rate_bps as u128 * days as u128
        / (BASIS_POINTS as u128 * DAYS_PER_MONTH as u128);
    profit as u64
}

/// Accrued profit not yet consumed by withdrawals or reinvestment.
pub fn available_profit(accrued: u64, withdrawn: u64) -> u64 {
    accrued.saturating_sub(withdrawn)
}

/// Early-exit payout: principal net of already-withdrawn profit. Accrued but
/// unwithdrawn interest is forfeited. Kept in one place so the penalty policy
/// is a one-line change.
pub fn early_exit_payout(principal: u64, withdrawn_profit: u64) -> u64 {
    principal.saturating_sub(withdrawn_profit)
}

/// Projected total payout at maturity (principal + full-term profit).
pub fn expected_return(principal: u64, effective_rate_bps: u16, duration_months: u8) -> u64 {
    let full_term_days = duration_months as i64 * DAYS_PER_MONTH;
    principal.saturating_add(profit_for_days(principal, effective_rate_bps, full_term_days))
}

/// Level-1 commission percent by referee rank (1-based, ascending join order).
/// Later referees in a bigger network earn the referrer a higher cut.
pub fn rank_commission_percent(rank: u32) -> u8 {
    match rank {
        0 | 1 => 3,
        2..=3 => 4,
        4..=5 => 5,
        6..=9 => 6,
        _ => 7,
    }
}

/// Commission on a referee's accumulated invested amount.
pub fn commission_amount(total_invested: u64, percent: u8) -> u64 {
    (total_invested as u128 * percent as u128 / 100) as u64
}

/// One referee's priced commission line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefereeCommission {
    pub referee: Pubkey,
    pub rank: u32,
    pub percent: u8,
    pub invested: u64,
    pub commission: u64,
}

/// Commission breakdown across both referral levels.
#[derive(Debug, Clone, Default)]
pub struct ReferralStats {
    pub level1: Vec<RefereeCommission>,
    pub level2: Vec<RefereeCommission>,
    pub total_earnings: u64,
}

/// Price a referrer's whole network from raw edge data. Level-1 referees are
/// ranked by join time ascending and priced per rank; level-2 referees earn a
/// flat percent. Recomputed on every read, never persisted, so a rank-table
/// change reprices the whole history.
pub fn compute_referral_stats(
    level1_edges: &[(Pubkey, i64, u64)],
    level2_edges: &[(Pubkey, i64, u64)],
) -> ReferralStats {
    let mut ordered: Vec<&(Pubkey, i64, u64)> = level1_edges.iter().collect();
    ordered.sort_by_key(|(referee, joined_at, _)| (*joined_at, *referee));

    let mut stats = ReferralStats::default();
    let mut total: u64 = 0;

    for (i, (referee, _, invested)) in ordered.iter().enumerate() {
        let rank = (i + 1) as u32;
        let percent = rank_commission_percent(rank);
        let commission = commission_amount(*invested, percent);
        total = total.saturating_add(commission);
        stats.level1.push(RefereeCommission {
            referee: *referee,
            rank,
            percent,
            invested: *invested,
            commission,
        });
    }

    for (referee, _, invested) in level2_edges {
        let commission = commission_amount(*invested, LEVEL2_COMMISSION_PERCENT);
        total = total.saturating_add(commission);
        stats.level2.push(RefereeCommission {
            referee: *referee,
            rank: 0,
            percent: LEVEL2_COMMISSION_PERCENT,
            invested: *invested,
            commission,
        });
    }

    stats.total_earnings = total;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accrues_advanced_tier_example() {
        // $1,000 at 17%/month for 30 days => $170.00
        let accrued = profit_for_days(100_000, 1700, 30);
        assert_eq!(accrued, 17_000);
    }

    #[test]
    fn accrual_is_day_granular() {
        let start = 1_700_000_000;
        // 29 days and 23 hours still counts as 29 days
        let now = start + 29 * SECONDS_PER_DAY + 23 * 3600;
        assert_eq!(elapsed_days(start, now, 0, 90), 29);
    }

    #[test]
    fn elapsed_days_clamps_at_maturity() {
        let start = 1_700_000_000;
        let now = start + 400 * SECONDS_PER_DAY;
        assert_eq!(elapsed_days(start, now, 0, 90), 90);
        // simulated offset cannot push past maturity either
        assert_eq!(elapsed_days(start, start, 500, 90), 90);
    }

    #[test]
    fn elapsed_days_never_negative() {
        let start = 1_700_000_000;
        assert_eq!(elapsed_days(start, start - SECONDS_PER_DAY, 0, 90), 0);
    }

    #[test]
    fn simulated_offset_adds_to_real_time() {
        let start = 1_700_000_000;
        let now = start + 10 * SECONDS_PER_DAY;
        assert_eq!(elapsed_days(start, now, 20, 90), 30);
    }

    #[test]
    fn early_exit_forfeits_interest() {
        // $1,000 principal with $50 already withdrawn => $950.00 back
        assert_eq!(early_exit_payout(100_000, 5_000), 95_000);
        assert_eq!(early_exit_payout(100_000, 0), 100_000);
    }

    #[test]
    fn available_profit_never_underflows() {
        assert_eq!(available_profit(10_000, 17_000), 0);
        assert_eq!(available_profit(17_000, 10_000), 7_000);
    }

    #[test]
    fn rank_table_matches_policy() {
        assert_eq!(rank_commission_percent(1), 3);
        assert_eq!(rank_commission_percent(2), 4);
        assert_eq!(rank_commission_percent(3), 4);
        assert_eq!(rank_commission_percent(4), 5);
        assert_eq!(rank_commission_percent(5), 5);
        assert_eq!(rank_commission_percent(6), 6);
        assert_eq!(rank_commission_percent(9), 6);
        assert_eq!(rank_commission_percent(10), 7);
        assert_eq!(rank_commission_percent(25), 7);
    }

    #[test]
    fn sixth_referee_earns_six_percent() {
        // 7 referees sorted by join date; the 6th invested $2,000 => $120.00
        let edges: Vec<(Pubkey, i64, u64)> = (0..7)
            .map(|i| (Pubkey::new_unique(), 1_000 + i as i64, 100_000))
            .collect();
        let mut edges = edges;
        edges[5].2 = 200_000;

        let stats = compute_referral_stats(&edges, &[]);
        let sixth = &stats.level1[5];
        assert_eq!(sixth.rank, 6);
        assert_eq!(sixth.percent, 6);
        assert_eq!(sixth.commission, 12_000);
    }

    #[test]
    fn level2_is_flat_three_percent() {
        let referee = Pubkey::new_unique();
        let stats = compute_referral_stats(&[], &[(referee, 0, 200_000)]);
        assert_eq!(stats.level2[0].percent, 3);
        assert_eq!(stats.level2[0].commission, 6_000);
        assert_eq!(stats.total_earnings, 6_000);
    }

    #[test]
    fn stats_order_is_join_time_not_input_order() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let stats = compute_referral_stats(&[(a, 2_000, 100_000), (b, 1_000, 100_000)], &[]);
        assert_eq!(stats.level1[0].referee, b);
        assert_eq!(stats.level1[0].rank, 1);
        assert_eq!(stats.level1[1].referee, a);
        assert_eq!(stats.level1[1].rank, 2);
    }

    #[test]
    fn expected_return_projects_full_term() {
        // $1,000 at 17%/month over 3 months => $1,000 + $510
        assert_eq!(expected_return(100_000, 1700, 3), 151_000);
    }
}
