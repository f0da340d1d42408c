// instructions/reinvest.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::state::*;

/// Roll available profit back into the principal. The amount is booked as
/// withdrawn profit and re-deposited in one step; the bigger principal is
/// then re-resolved against the package table, and a crossed tier bound
/// upgrades the base rate in place. Start date, duration and its bonus stay
/// as they were.
pub fn handler(ctx: Context<Reinvest>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let engine_state = &ctx.accounts.engine_state;
    let engine_config = &ctx.accounts.engine_config;
    let investment = &mut ctx.accounts.investment;

    if engine_state.is_paused {
        return Err(YieldDeskError::DeskPaused.into());
    }

    let old_tier = investment.tier;
    let old_rate = investment.base_rate_bps;
    let available_before = investment.available_profit(now);

    investment.apply_reinvestment(amount, now)?;

    let (new_tier, new_rate_bps) = engine_config.resolve_package(investment.principal)?;
    let upgraded = investment.adopt_package(new_tier, new_rate_bps);

    emit!(crate::InvestmentReinvested {
        investment: investment.key(),
        owner: investment.owner,
        amount,
        new_principal: investment.principal,
        old_tier: old_tier.to_index() as u8,
        new_tier: new_tier.to_index() as u8,
        upgraded,
        reinvested_at: now,
    });

    msg!(
        "🔁 Reinvested {} of {} cents available profit",
        amount,
        available_before
    );
    msg!("New principal: {} cents", investment.principal);
    if upgraded {
        msg!(
            "⬆️ Package upgraded: {} ({} bps) -> {} ({} bps)",
            old_tier.name(),
            old_rate,
            new_tier.name(),
            new_rate_bps
        );
    } else {
        msg!("Package unchanged: {}", old_tier.name());
    }

    Ok(())
}

#[derive(Accounts)]
pub struct Reinvest<'info> {
    /// Investment owner
    pub owner: Signer<'info>,

    /// Investment being compounded
    #[account(
        mut,
        constraint = investment.owner == owner.key() @ YieldDeskError::InvestmentNotOwned
    )]
    pub investment: Account<'info, Investment>,

    /// Engine configuration (package table for re-resolution)
    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.bump
    )]
    pub engine_config: Account<'info, EngineConfig>,

    /// Engine state (pause gate)
    #[account(
        seeds = [ENGINE_STATE_SEED],
        bump = engine_state.bump
    )]
    pub engine_state: Account<'info, EngineState>,
}
