// instructions/process_withdrawal.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::state::*;

/// Approve a pending request and apply its ledger mutation in the same
/// transaction. Retrying an already-approved request is a no-op success, so
/// an operator double-click or a redelivered approval message cannot pay
/// twice.
pub fn approve(ctx: Context<ApproveWithdrawal>) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let engine_state = &mut ctx.accounts.engine_state;
    let request = &mut ctx.accounts.request;
    let investment = &mut ctx.accounts.investment;

    if !request.begin_approval()? {
        msg!("Request already approved, nothing to do");
        return Ok(());
    }

    let payout = match request.kind {
        WithdrawalKind::Partial => {
            investment.apply_partial_withdrawal(request.computed_amount, now)?;
            engine_state.add_withdrawal(request.computed_amount);
            request.computed_amount
        }
        WithdrawalKind::Early => {
            let payout = investment.apply_early_withdrawal()?;
            engine_state.add_withdrawal(payout);
            payout
        }
        WithdrawalKind::Full => {
            let payout = investment.apply_full_withdrawal(now)?;
            engine_state.add_withdrawal(payout);
            payout
        }
        WithdrawalKind::ReferralBonus => {
            let earning = ctx
                .accounts
                .earning
                .as_mut()
                .ok_or(YieldDeskError::EarningNotFound)?;
            if request.earning != Some(earning.key()) {
                return Err(YieldDeskError::EarningNotFound.into());
            }
            earning.mark_paid()?;
            engine_state.add_referral_payment(request.computed_amount);
            request.computed_amount
        }
    };

    request.mark_approved(ctx.accounts.approver.key(), now);
    investment.clear_pending_request();

    emit!(crate::WithdrawalApproved {
        request: request.key(),
        investment: investment.key(),
        kind: request.kind.name().to_string(),
        amount: payout,
        approved_by: ctx.accounts.approver.key(),
        processed_at: now,
    });

    msg!(
        "✅ Withdrawal approved: kind={}, payout={} cents",
        request.kind.name(),
        payout
    );
    msg!("Investment status: {:?}", investment.status);

    Ok(())
}

/// Reject a pending request. The ledger is untouched and the investment is
/// freed for a new request of any kind.
pub fn reject(ctx: Context<RejectWithdrawal>, reason: String) -> Result<()> {
    let clock = Clock::get()?;
    let request = &mut ctx.accounts.request;
    let investment = &mut ctx.accounts.investment;

    if !request.begin_rejection()? {
        msg!("Request already rejected, nothing to do");
        return Ok(());
    }

    request.mark_rejected(ctx.accounts.approver.key(), clock.unix_timestamp, reason.clone())?;
    investment.clear_pending_request();

    emit!(crate::WithdrawalRejected {
        request: request.key(),
        investment: investment.key(),
        kind: request.kind.name().to_string(),
        reason,
        rejected_by: ctx.accounts.approver.key(),
        processed_at: clock.unix_timestamp,
    });

    msg!("❌ Withdrawal rejected: kind={}", request.kind.name());

    Ok(())
}

#[derive(Accounts)]
pub struct ApproveWithdrawal<'info> {
    /// Holder of the approve/reject privilege
    #[account(
        constraint = approver.key() == engine_state.approver @ YieldDeskError::UnauthorizedApprover
    )]
    pub approver: Signer<'info>,

    /// Request being decided
    #[account(
        mut,
        constraint = request.investment == investment.key()
    )]
    pub request: Account<'info, WithdrawalRequest>,

    /// Investment the request mutates
    #[account(mut)]
    pub investment: Account<'info, Investment>,

    /// Earning being paid, referral-bonus kind only
    #[account(mut)]
    pub earning: Option<Account<'info, ReferralEarning>>,

    /// Engine state (for statistics)
    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,
}

#[derive(Accounts)]
pub struct RejectWithdrawal<'info> {
    /// Holder of the approve/reject privilege
    #[account(
        constraint = approver.key() == engine_state.approver @ YieldDeskError::UnauthorizedApprover
    )]
    pub approver: Signer<'info>,

    /// Request being decided
    #[account(
        mut,
        constraint = request.investment == investment.key()
    )]
    pub request: Account<'info, WithdrawalRequest>,

    /// Investment the request was filed against; only its pending flag moves
    #[account(mut)]
    pub investment: Account<'info, Investment>,

    /// Engine state (approver lookup)
    #[account(
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,
}
