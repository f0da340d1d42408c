use anchor_lang::prelude::*;

// Import modules
pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

// Re-export for convenience
pub use constants::*;
pub use error::*;
pub use instructions::*;
pub use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod yield_desk {
    use super::*;

    /// Initialize the desk with config and state
    pub fn initialize(ctx: Context<Initialize>, approver: Pubkey) -> Result<()> {
        instructions::initialize::handler(ctx, approver)
    }

    /// Register an investor, optionally with a referrer link
    pub fn create_investor(ctx: Context<CreateInvestor>, referrer: Option<Pubkey>) -> Result<()> {
        instructions::create_investor::handler(ctx, referrer)
    }

    /// Open a time-boxed, tiered-yield investment
    pub fn create_investment(
        ctx: Context<CreateInvestment>,
        amount: u64,
        duration_months: u8,
    ) -> Result<()> {
        instructions::create_investment::handler(ctx, amount, duration_months)
    }

    /// Log the current accrual snapshot for one investment (read-only)
    pub fn get_accrual_snapshot(ctx: Context<GetAccrualSnapshot>) -> Result<()> {
        instructions::accrual::get_accrual_snapshot(ctx)
    }

    /// File a pending withdrawal request of any kind
    pub fn request_withdrawal(
        ctx: Context<RequestWithdrawal>,
        kind: WithdrawalKind,
        requested_amount: Option<u64>,
    ) -> Result<()> {
        instructions::request_withdrawal::handler(ctx, kind, requested_amount)
    }

    /// Approve a pending request and apply its ledger mutation
    pub fn approve_withdrawal(ctx: Context<ApproveWithdrawal>) -> Result<()> {
        instructions::process_withdrawal::approve(ctx)
    }

    /// Reject a pending request, freeing the investment for a new one
    pub fn reject_withdrawal(ctx: Context<RejectWithdrawal>, reason: String) -> Result<()> {
        instructions::process_withdrawal::reject(ctx, reason)
    }

    /// Roll available profit back into the principal
    pub fn reinvest(ctx: Context<Reinvest>, amount: u64) -> Result<()> {
        instructions::reinvest::handler(ctx, amount)
    }

    /// Credit a referral commission for a funded investment (authority only)
    pub fn credit_referral_commission(
        ctx: Context<CreditReferralCommission>,
        level: u8,
    ) -> Result<()> {
        instructions::referral::credit_referral_commission(ctx, level)
    }

    /// Log the caller's commission breakdown (read-only, repriced per call)
    pub fn get_referral_stats(ctx: Context<GetReferralStats>) -> Result<()> {
        instructions::referral::get_referral_stats(ctx)
    }

    /// Pause or resume the desk (authority only)
    pub fn toggle_pause(ctx: Context<TogglePause>) -> Result<()> {
        instructions::admin::toggle_pause(ctx)
    }

    /// Hand the approver privilege to another key (authority only)
    pub fn update_approver(ctx: Context<UpdateApprover>, new_approver: Pubkey) -> Result<()> {
        instructions::admin::update_approver(ctx, new_approver)
    }

    /// Record the external KYC verdict for one investor (authority only)
    pub fn set_kyc_status(ctx: Context<SetKycStatus>, verified: bool) -> Result<()> {
        instructions::admin::set_kyc_status(ctx, verified)
    }

    /// Skew one investment's test clock by whole days (authority only)
    pub fn simulate_time(ctx: Context<SimulateTime>, extra_days: i64) -> Result<()> {
        instructions::admin::simulate_time(ctx, extra_days)
    }
}

// ============================================================================
// VIEW DATA
// ============================================================================

/// Accrual snapshot handed to off-chain consumers
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct AccrualSnapshotData {
    pub owner: Pubkey,
    pub principal: u64,
    pub accrued_profit: u64,
    pub available_profit: u64,
    pub elapsed_days: i64,
    pub is_mature: bool,
    pub expected_return: u64,
}

// ============================================================================
// EVENTS
// ============================================================================

#[event]
pub struct InvestorRegistered {
    pub owner: Pubkey,
    pub referrer: Option<Pubkey>,
    pub registered_at: i64,
}

#[event]
pub struct InvestmentCreated {
    pub owner: Pubkey,
    pub investment: Pubkey,
    pub tier: u8,
    pub principal: u64,
    pub duration_months: u8,
    pub effective_rate_bps: u16,
    pub cash_bonus: u64,
    pub started_at: i64,
}

#[event]
pub struct WithdrawalRequested {
    pub request: Pubkey,
    pub investment: Pubkey,
    pub requested_by: Pubkey,
    pub kind: String,
    pub computed_amount: u64,
    pub created_at: i64,
}

#[event]
pub struct WithdrawalApproved {
    pub request: Pubkey,
    pub investment: Pubkey,
    pub kind: String,
    pub amount: u64,
    pub approved_by: Pubkey,
    pub processed_at: i64,
}

#[event]
pub struct WithdrawalRejected {
    pub request: Pubkey,
    pub investment: Pubkey,
    pub kind: String,
    pub reason: String,
    pub rejected_by: Pubkey,
    pub processed_at: i64,
}

#[event]
pub struct InvestmentReinvested {
    pub investment: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub new_principal: u64,
    pub old_tier: u8,
    pub new_tier: u8,
    pub upgraded: bool,
    pub reinvested_at: i64,
}

#[event]
pub struct ReferralCommissionCredited {
    pub referrer: Pubkey,
    pub referee: Pubkey,
    pub investment: Pubkey,
    pub level: u8,
    pub percent: u8,
    pub amount: u64,
}

#[event]
pub struct ReferralStatsComputed {
    pub user: Pubkey,
    pub level1_count: u32,
    pub level2_count: u32,
    pub total_earnings: u64,
}

#[event]
pub struct KycStatusUpdated {
    pub investor: Pubkey,
    pub verified: bool,
}

#[event]
pub struct TimeSimulated {
    pub investment: Pubkey,
    pub extra_days: i64,
    pub offset_days: i64,
}
