// instructions/accrual.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::*;

/// Read-only accrual snapshot. Logs a parseable line for the backend and
/// emits nothing else; the investment row is untouched.
pub fn get_accrual_snapshot(ctx: Context<GetAccrualSnapshot>) -> Result<()> {
    let investment = &ctx.accounts.investment;
    let clock = Clock::get()?;

    let snapshot = investment.snapshot(clock.unix_timestamp);

    msg!(
        "ACCRUAL_SNAPSHOT: investment={}, owner={}, principal={}, accrued={}, available={}, withdrawn={}, elapsed_days={}, mature={}, expected_return={}",
        ctx.accounts.investment.key(),
        snapshot.owner,
        snapshot.principal,
        snapshot.accrued_profit,
        snapshot.available_profit,
        investment.withdrawn_profit,
        snapshot.elapsed_days,
        snapshot.is_mature,
        snapshot.expected_return,
    );

    Ok(())
}

#[derive(Accounts)]
pub struct GetAccrualSnapshot<'info> {
    /// Investment being inspected
    #[account(
        seeds = [
            INVESTMENT_SEED,
            investment.owner.as_ref(),
            &investment.index.to_le_bytes()
        ],
        bump = investment.bump
    )]
    pub investment: Account<'info, Investment>,
}
