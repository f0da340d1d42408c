// error.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum YieldDeskError {
    // 💸 VALIDATION
    #[msg("Amount is outside all package bounds")]
    AmountOutOfRange,

    #[msg("Duration must be 3, 6 or 12 months")]
    InvalidDuration,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Rejection reason is empty or too long")]
    InvalidReason,

    #[msg("Simulated offset cannot go below zero")]
    InvalidSimulatedOffset,

    // 🔎 LOOKUP
    #[msg("Referral earning account is required for this request kind")]
    EarningNotFound,

    #[msg("Referrer account not found")]
    ReferrerNotFound,

    // ⛔ CONFLICT
    #[msg("A pending withdrawal request already exists for this investment")]
    PendingRequestExists,

    #[msg("Referral commission already credited for this investment")]
    CommissionAlreadyCredited,

    // 🧭 STATE
    #[msg("Investment is not active")]
    InvestmentNotActive,

    #[msg("Investment has not reached maturity yet")]
    NotMatured,

    #[msg("Investment is already past maturity")]
    PastMaturity,

    #[msg("Request is not pending")]
    RequestNotPending,

    #[msg("Request was already approved")]
    RequestAlreadyApproved,

    #[msg("Request was already rejected")]
    RequestAlreadyRejected,

    #[msg("Referral earning was already paid out")]
    EarningAlreadyPaid,

    #[msg("Desk is paused")]
    DeskPaused,

    #[msg("Maximum investments limit reached")]
    MaxInvestmentsReached,

    // 🔐 AUTHORIZATION
    #[msg("Unauthorized admin action")]
    UnauthorizedAdmin,

    #[msg("Caller does not hold the approver privilege")]
    UnauthorizedApprover,

    #[msg("Invalid approver key")]
    InvalidApprover,

    #[msg("KYC verification required")]
    KycRequired,

    #[msg("Investment not owned by caller")]
    InvestmentNotOwned,

    #[msg("Cannot refer yourself")]
    CannotReferYourself,

    #[msg("Invalid referrer")]
    InvalidReferrer,

    #[msg("Invalid referral level")]
    InvalidReferralLevel,

    // 💰 FUNDS
    #[msg("Requested amount exceeds available profit")]
    InsufficientProfit,

    // 🧮 MISC
    #[msg("Math overflow")]
    MathOverflow,
}
