// instructions/admin.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::state::*;

/// Admin function to pause/unpause the desk
pub fn toggle_pause(ctx: Context<TogglePause>) -> Result<()> {
    let engine_state = &mut ctx.accounts.engine_state;

    engine_state.toggle_pause();

    msg!("Desk pause toggled. New state: {}", engine_state.is_paused);

    Ok(())
}

/// Hand the approve/reject privilege to another key
pub fn update_approver(ctx: Context<UpdateApprover>, new_approver: Pubkey) -> Result<()> {
    let engine_state = &mut ctx.accounts.engine_state;

    if new_approver == Pubkey::default() {
        return Err(YieldDeskError::InvalidApprover.into());
    }

    let old_approver = engine_state.approver;
    engine_state.approver = new_approver;

    msg!("Approver updated: {} -> {}", old_approver, new_approver);

    Ok(())
}

/// Record the verdict of the external KYC collaborator for one investor
pub fn set_kyc_status(ctx: Context<SetKycStatus>, verified: bool) -> Result<()> {
    let investor = &mut ctx.accounts.investor;

    investor.kyc_verified = verified;

    emit!(crate::KycStatusUpdated {
        investor: investor.owner,
        verified,
    });

    msg!("KYC status for {}: {}", investor.owner, verified);

    Ok(())
}

/// Test-only clock skew for one investment. The offset is a column on the
/// row itself, so poking one investment can never move another one's clock.
pub fn simulate_time(ctx: Context<SimulateTime>, extra_days: i64) -> Result<()> {
    let investment = &mut ctx.accounts.investment;

    investment.add_simulated_days(extra_days)?;

    emit!(crate::TimeSimulated {
        investment: investment.key(),
        extra_days,
        offset_days: investment.simulated_offset_days,
    });

    msg!(
        "🎮 Simulated clock moved by {} days, offset now {} days",
        extra_days,
        investment.simulated_offset_days
    );

    Ok(())
}

#[derive(Accounts)]
pub struct TogglePause<'info> {
    #[account(
        constraint = authority.key() == engine_state.authority @ YieldDeskError::UnauthorizedAdmin
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,
}

#[derive(Accounts)]
pub struct UpdateApprover<'info> {
    #[account(
        constraint = authority.key() == engine_state.authority @ YieldDeskError::UnauthorizedAdmin
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,
}

#[derive(Accounts)]
pub struct SetKycStatus<'info> {
    #[account(
        constraint = authority.key() == engine_state.authority @ YieldDeskError::UnauthorizedAdmin
    )]
    pub authority: Signer<'info>,

    /// Investor whose KYC verdict is being recorded
    #[account(
        mut,
        seeds = [INVESTOR_SEED, investor.owner.as_ref()],
        bump = investor.bump
    )]
    pub investor: Account<'info, Investor>,

    #[account(
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,
}

#[derive(Accounts)]
pub struct SimulateTime<'info> {
    #[account(
        constraint = authority.key() == engine_state.authority @ YieldDeskError::UnauthorizedAdmin
    )]
    pub authority: Signer<'info>,

    /// Investment whose clock is being skewed
    #[account(mut)]
    pub investment: Account<'info, Investment>,

    #[account(
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,
}
