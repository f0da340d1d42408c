// instructions/request_withdrawal.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::state::*;

/// Open a withdrawal request. Nothing is paid here: the request enters the
/// PENDING state and waits for the approver. The payout amount is computed
/// and frozen now, per kind:
///
/// - partial: the investor-chosen slice of available profit
/// - early: principal minus already-withdrawn profit (interest forfeited)
/// - full: principal plus remaining profit, only at maturity
/// - referral_bonus: the amount of one unpaid referral earning
///
/// At most one pending request may exist per investment; the guard flag is
/// flipped in the same transaction as the request insert, so two concurrent
/// creations cannot both land.
pub fn handler(
    ctx: Context<RequestWithdrawal>,
    kind: WithdrawalKind,
    requested_amount: Option<u64>,
) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let engine_state = &ctx.accounts.engine_state;
    let investor = &ctx.accounts.investor;
    let investment = &mut ctx.accounts.investment;

    if engine_state.is_paused {
        return Err(YieldDeskError::DeskPaused.into());
    }
    if !investor.kyc_verified {
        return Err(YieldDeskError::KycRequired.into());
    }

    // the chosen amount only means something for partial withdrawals
    let requested_amount = match kind {
        WithdrawalKind::Partial => requested_amount,
        _ => None,
    };

    let mut earning_key: Option<Pubkey> = None;

    let computed_amount = match kind {
        WithdrawalKind::Partial => {
            if investment.owner != ctx.accounts.owner.key() {
                return Err(YieldDeskError::InvestmentNotOwned.into());
            }
            if !investment.is_active() {
                return Err(YieldDeskError::InvestmentNotActive.into());
            }
            let amount = requested_amount.ok_or(YieldDeskError::InvalidAmount)?;
            if amount == 0 {
                return Err(YieldDeskError::InvalidAmount.into());
            }
            if amount > investment.available_profit(now) {
                return Err(YieldDeskError::InsufficientProfit.into());
            }
            amount
        }
        WithdrawalKind::Early => {
            if investment.owner != ctx.accounts.owner.key() {
                return Err(YieldDeskError::InvestmentNotOwned.into());
            }
            if !investment.is_active() {
                return Err(YieldDeskError::InvestmentNotActive.into());
            }
            if investment.is_mature(now) {
                return Err(YieldDeskError::PastMaturity.into());
            }
            crate::utils::calculations::early_exit_payout(
                investment.principal,
                investment.withdrawn_profit,
            )
        }
        WithdrawalKind::Full => {
            if investment.owner != ctx.accounts.owner.key() {
                return Err(YieldDeskError::InvestmentNotOwned.into());
            }
            if !investment.is_active() {
                return Err(YieldDeskError::InvestmentNotActive.into());
            }
            if !investment.is_mature(now) {
                return Err(YieldDeskError::NotMatured.into());
            }
            investment
                .principal
                .checked_add(investment.available_profit(now))
                .ok_or(YieldDeskError::MathOverflow)?
        }
        WithdrawalKind::ReferralBonus => {
            let earning = ctx
                .accounts
                .earning
                .as_ref()
                .ok_or(YieldDeskError::EarningNotFound)?;
            if earning.referrer != ctx.accounts.owner.key() {
                return Err(YieldDeskError::InvestmentNotOwned.into());
            }
            if earning.investment != investment.key() {
                return Err(YieldDeskError::EarningNotFound.into());
            }
            if earning.paid {
                return Err(YieldDeskError::EarningAlreadyPaid.into());
            }
            earning_key = Some(earning.key());
            earning.amount
        }
    };

    let index = investment.begin_request()?;

    let request = &mut ctx.accounts.request;
    **request = WithdrawalRequest::new(
        investment.key(),
        ctx.accounts.owner.key(),
        index,
        kind,
        requested_amount,
        computed_amount,
        earning_key,
        now,
        ctx.bumps.request,
    );

    emit!(crate::WithdrawalRequested {
        request: request.key(),
        investment: investment.key(),
        requested_by: ctx.accounts.owner.key(),
        kind: kind.name().to_string(),
        computed_amount,
        created_at: now,
    });

    msg!(
        "📨 Withdrawal request opened: kind={}, amount={} cents",
        kind.name(),
        computed_amount
    );
    msg!("Awaiting approver decision");

    Ok(())
}

#[derive(Accounts)]
pub struct RequestWithdrawal<'info> {
    /// Requester: the investment owner, or the referrer for a bonus payout
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Requester's investor account (KYC gate)
    #[account(
        seeds = [INVESTOR_SEED, owner.key().as_ref()],
        bump = investor.bump
    )]
    pub investor: Account<'info, Investor>,

    /// Investment the request is filed against
    #[account(mut)]
    pub investment: Account<'info, Investment>,

    /// The new request row; the index seed is the investment's request
    /// counter, so a retry of the same creation collides on the same address
    #[account(
        init,
        payer = owner,
        space = WithdrawalRequest::SIZE,
        seeds = [
            WITHDRAWAL_SEED,
            investment.key().as_ref(),
            &investment.request_count.to_le_bytes()
        ],
        bump
    )]
    pub request: Account<'info, WithdrawalRequest>,

    /// Unpaid referral earning being cashed out, bonus kind only
    pub earning: Option<Account<'info, ReferralEarning>>,

    /// Engine state (pause gate)
    #[account(
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,

    /// System program
    pub system_program: Program<'info, System>,
}
