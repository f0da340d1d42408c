// instructions/initialize.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::*;

/// Initialize the desk with EngineState and EngineConfig accounts
pub fn handler(ctx: Context<Initialize>, approver: Pubkey) -> Result<()> {
    let clock = Clock::get()?;

    let engine_state = &mut ctx.accounts.engine_state;
    **engine_state = EngineState::new(
        ctx.accounts.authority.key(),
        approver,
        clock.unix_timestamp,
        ctx.bumps.engine_state,
    );

    let engine_config = &mut ctx.accounts.engine_config;
    **engine_config = EngineConfig::new(ctx.accounts.authority.key(), ctx.bumps.engine_config);

    msg!("Yield desk initialized!");
    msg!("Authority: {}", ctx.accounts.authority.key());
    msg!("Approver: {}", approver);
    msg!("Packages: {}", PACKAGE_TIER_COUNT);

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Authority (admin) who can manage the desk
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Global engine state account
    #[account(
        init,
        payer = authority,
        space = EngineState::SIZE,
        seeds = [ENGINE_STATE_SEED],
        bump
    )]
    pub engine_state: Account<'info, EngineState>,

    /// Global engine configuration account
    #[account(
        init,
        payer = authority,
        space = EngineConfig::SIZE,
        seeds = [ENGINE_CONFIG_SEED],
        bump
    )]
    pub engine_config: Account<'info, EngineConfig>,

    /// System program for account creation
    pub system_program: Program<'info, System>,
}
