// instructions/create_investor.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::state::*;
use crate::utils::validation::validate_referrer;

/// Register a new investor, optionally linked to the referrer who brought
/// them in. The referrer link is fixed here and never changes afterwards.
pub fn handler(ctx: Context<CreateInvestor>, referrer: Option<Pubkey>) -> Result<()> {
    let clock = Clock::get()?;
    let engine_state = &mut ctx.accounts.engine_state;
    let engine_config = &ctx.accounts.engine_config;

    if engine_state.is_paused {
        return Err(YieldDeskError::DeskPaused.into());
    }
    if !engine_config.registrations_open {
        return Err(YieldDeskError::DeskPaused.into());
    }

    validate_referrer(ctx.accounts.owner.key(), referrer)?;

    // A named referrer must be a registered investor
    if let Some(referrer_key) = referrer {
        let referrer_investor = ctx
            .accounts
            .referrer_investor
            .as_ref()
            .ok_or(YieldDeskError::ReferrerNotFound)?;
        if referrer_investor.owner != referrer_key {
            return Err(YieldDeskError::InvalidReferrer.into());
        }
    }

    let investor = &mut ctx.accounts.investor;
    **investor = Investor::new(
        ctx.accounts.owner.key(),
        referrer,
        clock.unix_timestamp,
        ctx.bumps.investor,
    );

    engine_state.add_investor();

    emit!(crate::InvestorRegistered {
        owner: ctx.accounts.owner.key(),
        referrer,
        registered_at: clock.unix_timestamp,
    });

    msg!("Investor registered: {}", investor.owner);
    if let Some(referrer_key) = referrer {
        msg!("Referred by: {}", referrer_key);
    }

    Ok(())
}

#[derive(Accounts)]
pub struct CreateInvestor<'info> {
    /// Wallet registering with the desk
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Investor account
    #[account(
        init,
        payer = owner,
        space = Investor::SIZE,
        seeds = [INVESTOR_SEED, owner.key().as_ref()],
        bump
    )]
    pub investor: Account<'info, Investor>,

    /// Referrer's investor account, required when a referrer is named
    pub referrer_investor: Option<Account<'info, Investor>>,

    /// Engine configuration
    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.bump
    )]
    pub engine_config: Account<'info, EngineConfig>,

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
