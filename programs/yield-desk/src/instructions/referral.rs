// instructions/referral.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::state::*;
use crate::utils::calculations::{commission_amount, compute_referral_stats, rank_commission_percent};

/// Credit a referral commission for one funded investment. Called by the
/// authority right after the funding settles (the desk itself never moves
/// money). Upserts the referrer→referee edge, accumulates the referee's
/// invested total, and freezes a ReferralEarning the referrer can later cash
/// out through a referral-bonus withdrawal request.
///
/// Level 1 is priced by the referee's rank among the referrer's direct
/// referees (join order); level 2 is a flat percent. The earning PDA is
/// keyed by (referrer, investment), so crediting twice fails on the insert.
pub fn credit_referral_commission(ctx: Context<CreditReferralCommission>, level: u8) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let engine_state = &mut ctx.accounts.engine_state;
    let referee_investor = &ctx.accounts.referee_investor;
    let investment = &ctx.accounts.investment;
    let referrer_key = ctx.accounts.referrer.key();

    if level == 0 || level > MAX_REFERRAL_LEVELS {
        return Err(YieldDeskError::InvalidReferralLevel.into());
    }

    // The named referrer must actually sit at `level` above the referee
    match level {
        1 => {
            if referee_investor.referrer != Some(referrer_key) {
                return Err(YieldDeskError::InvalidReferrer.into());
            }
        }
        _ => {
            let intermediate = ctx
                .accounts
                .intermediate_investor
                .as_ref()
                .ok_or(YieldDeskError::ReferrerNotFound)?;
            if referee_investor.referrer != Some(intermediate.owner) {
                return Err(YieldDeskError::InvalidReferrer.into());
            }
            if intermediate.referrer != Some(referrer_key) {
                return Err(YieldDeskError::InvalidReferrer.into());
            }
        }
    }

    let edge = &mut ctx.accounts.edge;
    if !edge.is_initialized() {
        edge.referrer = referrer_key;
        edge.referee = referee_investor.owner;
        edge.level = level;
        edge.invested_amount = 0;
        edge.joined_at = referee_investor.created_at;
        edge.bump = ctx.bumps.edge;
    }
    edge.add_invested(investment.principal)?;

    let percent = if level == 1 {
        let rank = rank_among_referees(
            ctx.remaining_accounts,
            referrer_key,
            edge.referee,
            edge.joined_at,
        );
        rank_commission_percent(rank)
    } else {
        LEVEL2_COMMISSION_PERCENT
    };

    let amount = commission_amount(investment.principal, percent);

    let earning = &mut ctx.accounts.earning;
    **earning = ReferralEarning {
        referrer: referrer_key,
        referee: referee_investor.owner,
        investment: investment.key(),
        level,
        percent,
        amount,
        paid: false,
        created_at: now,
        bump: ctx.bumps.earning,
    };

    engine_state.add_referral_credit(amount);

    emit!(crate::ReferralCommissionCredited {
        referrer: referrer_key,
        referee: referee_investor.owner,
        investment: investment.key(),
        level,
        percent,
        amount,
    });

    msg!(
        "🤝 Referral commission credited: level={}, percent={}%, amount={} cents",
        level,
        percent,
        amount
    );

    Ok(())
}

/// 1-based rank of a referee among the referrer's level-1 edges, ordered by
/// join time ascending. The caller passes the referrer's other edges as
/// remaining accounts; accounts that do not deserialize as edges are skipped.
fn rank_among_referees(
    remaining_accounts: &[AccountInfo],
    referrer: Pubkey,
    referee: Pubkey,
    joined_at: i64,
) -> u32 {
    let mut earlier = 0u32;

    for account_info in remaining_accounts {
        let data = account_info.data.borrow();
        let other = match ReferralEdge::try_deserialize(&mut data.as_ref()) {
            Ok(edge) => edge,
            Err(_) => {
                msg!("⚠️ Skipping non-edge account {}", account_info.key());
                continue;
            }
        };
        if other.referrer != referrer || other.level != 1 || other.referee == referee {
            continue;
        }
        if (other.joined_at, other.referee) < (joined_at, referee) {
            earlier += 1;
        }
    }

    earlier + 1
}

/// Read-only commission breakdown for one referrer. Edges come in as
/// remaining accounts; everything is recomputed from current ranks on every
/// call, so a later-joining network reprices the view, never the books.
pub fn get_referral_stats(ctx: Context<GetReferralStats>) -> Result<()> {
    let user_key = ctx.accounts.user.key();

    let mut level1: Vec<(Pubkey, i64, u64)> = Vec::new();
    let mut level2: Vec<(Pubkey, i64, u64)> = Vec::new();

    for account_info in ctx.remaining_accounts {
        let data = account_info.data.borrow();
        let edge = match ReferralEdge::try_deserialize(&mut data.as_ref()) {
            Ok(edge) => edge,
            Err(_) => continue,
        };
        if edge.referrer != user_key {
            continue;
        }
        match edge.level {
            1 => level1.push((edge.referee, edge.joined_at, edge.invested_amount)),
            2 => level2.push((edge.referee, edge.joined_at, edge.invested_amount)),
            _ => {}
        }
    }

    let stats = compute_referral_stats(&level1, &level2);

    for line in &stats.level1 {
        msg!(
            "REFERRAL_L1: referee={}, rank={}, percent={}, invested={}, commission={}",
            line.referee,
            line.rank,
            line.percent,
            line.invested,
            line.commission
        );
    }
    for line in &stats.level2 {
        msg!(
            "REFERRAL_L2: referee={}, percent={}, invested={}, commission={}",
            line.referee,
            line.percent,
            line.invested,
            line.commission
        );
    }
    msg!(
        "REFERRAL_STATS: user={}, level1={}, level2={}, total_earnings={}",
        user_key,
        stats.level1.len(),
        stats.level2.len(),
        stats.total_earnings
    );

    emit!(crate::ReferralStatsComputed {
        user: user_key,
        level1_count: stats.level1.len() as u32,
        level2_count: stats.level2.len() as u32,
        total_earnings: stats.total_earnings,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CreditReferralCommission<'info> {
    /// Authority or backend signer - only they may credit commissions
    #[account(
        mut,
        constraint = authority.key() == engine_state.authority @ YieldDeskError::UnauthorizedAdmin
    )]
    pub authority: Signer<'info>,

    /// Wallet earning the commission
    /// CHECK: validated against the referral chain in the handler
    pub referrer: AccountInfo<'info>,

    /// Investor whose funded investment triggers the commission
    #[account(
        seeds = [INVESTOR_SEED, referee_investor.owner.as_ref()],
        bump = referee_investor.bump
    )]
    pub referee_investor: Account<'info, Investor>,

    /// The level-1 referrer's investor account, required for level-2 credits
    pub intermediate_investor: Option<Account<'info, Investor>>,

    /// The funded investment
    #[account(
        constraint = investment.owner == referee_investor.owner @ YieldDeskError::InvestmentNotOwned
    )]
    pub investment: Account<'info, Investment>,

    /// Referrer→referee edge, created on first credit
    #[account(
        init_if_needed,
        payer = authority,
        space = ReferralEdge::SIZE,
        seeds = [
            REFERRAL_EDGE_SEED,
            referrer.key().as_ref(),
            referee_investor.owner.as_ref()
        ],
        bump
    )]
    pub edge: Account<'info, ReferralEdge>,

    /// Frozen earning for this (referrer, investment) pair
    #[account(
        init,
        payer = authority,
        space = ReferralEarning::SIZE,
        seeds = [
            REFERRAL_EARNING_SEED,
            referrer.key().as_ref(),
            investment.key().as_ref()
        ],
        bump
    )]
    pub earning: Account<'info, ReferralEarning>,

    /// Engine state (for statistics)
    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,

    /// System program
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct GetReferralStats<'info> {
    /// Referrer asking for their breakdown
    pub user: Signer<'info>,
}
