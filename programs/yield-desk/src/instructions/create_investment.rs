// instructions/create_investment.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::state::*;
use crate::utils::validation::validate_duration;

/// Open a new time-boxed investment. The deposit amount picks the package
/// (and with it the base monthly rate), the lock-in duration picks the rate
/// bonus and the one-time cash bonus. Settlement of the incoming funds is the
/// external collaborator's job; the desk records amounts and statuses.
pub fn handler(ctx: Context<CreateInvestment>, amount: u64, duration_months: u8) -> Result<()> {
    let clock = Clock::get()?;
    let engine_config = &ctx.accounts.engine_config;
    let engine_state = &mut ctx.accounts.engine_state;
    let investor = &mut ctx.accounts.investor;

    if engine_state.is_paused {
        return Err(YieldDeskError::DeskPaused.into());
    }

    // KYC must be cleared before any money is recorded
    if !investor.kyc_verified {
        return Err(YieldDeskError::KycRequired.into());
    }

    validate_duration(duration_months)?;

    if !investor.can_open_investment(engine_config.max_investments_per_investor) {
        return Err(YieldDeskError::MaxInvestmentsReached.into());
    }

    let (tier, base_rate_bps) = engine_config.resolve_package(amount)?;
    let duration_bonus_bps = engine_config.duration_bonus_bps(duration_months)?;
    let cash_bonus = engine_config.cash_bonus_for(duration_months, amount);

    let index = investor.record_investment(amount)?;

    let investment = &mut ctx.accounts.investment;
    **investment = Investment::new(
        ctx.accounts.owner.key(),
        index,
        amount,
        tier,
        base_rate_bps,
        duration_months,
        duration_bonus_bps,
        cash_bonus,
        clock.unix_timestamp,
        ctx.bumps.investment,
    );

    engine_state.add_investment(amount);

    emit!(crate::InvestmentCreated {
        owner: ctx.accounts.owner.key(),
        investment: investment.key(),
        tier: tier.to_index() as u8,
        principal: amount,
        duration_months,
        effective_rate_bps: investment.effective_rate_bps(),
        cash_bonus,
        started_at: clock.unix_timestamp,
    });

    msg!("💼 Investment opened!");
    msg!("Package: {}", tier.name());
    msg!("Principal: {} cents", amount);
    msg!(
        "Rate: {} bps/month (+{} bps duration bonus)",
        base_rate_bps,
        duration_bonus_bps
    );
    msg!("Duration: {} months", duration_months);
    if cash_bonus > 0 {
        msg!("Cash bonus awarded: {} cents", cash_bonus);
    }
    msg!("Expected return: {} cents", investment.expected_return());

    Ok(())
}

#[derive(Accounts)]
pub struct CreateInvestment<'info> {
    /// Investor funding the deposit
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Investor account, carries the PDA index for the new investment
    #[account(
        mut,
        seeds = [INVESTOR_SEED, owner.key().as_ref()],
        bump = investor.bump,
        constraint = investor.owner == owner.key() @ YieldDeskError::InvestmentNotOwned
    )]
    pub investor: Account<'info, Investor>,

    /// The new investment row
    #[account(
        init,
        payer = owner,
        space = Investment::SIZE,
        seeds = [
            INVESTMENT_SEED,
            owner.key().as_ref(),
            &investor.investment_count.to_le_bytes()
        ],
        bump
    )]
    pub investment: Account<'info, Investment>,

    /// Engine configuration (package and bonus tables)
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
