// constants.rs

// ============================================================================
// PACKAGE CONFIGURATION
// ============================================================================

/// Number of deposit packages
pub const PACKAGE_TIER_COUNT: usize = 4;

/// Package lower bounds in USD cents
pub const TIER_MIN_AMOUNTS: [u64; 4] = [
    10_000,    // $100 - Starter
    100_000,   // $1,000 - Advanced
    300_000,   // $3,000 - Pro
    600_000,   // $6,000 - Elite
];

/// Package upper bounds in USD cents (inclusive)
pub const TIER_MAX_AMOUNTS: [u64; 4] = [
    99_999,      // $999.99 - Starter
    299_999,     // $2,999.99 - Advanced
    599_999,     // $5,999.99 - Pro
    10_000_000,  // $100,000 - Elite
];

/// Monthly rates in basis points, larger deposits = higher %
pub const TIER_MONTHLY_RATES: [u16; 4] = [1400, 1700, 2000, 2200]; // 14%-22%

// ============================================================================
// DURATION BONUSES
// ============================================================================

/// Number of lock-in duration choices
pub const DURATION_CHOICE_COUNT: usize = 3;

/// Allowed lock-in durations in months
pub const DURATION_CHOICES: [u8; 3] = [3, 6, 12];

/// Monthly-rate bonus per duration choice (basis points)
pub const DURATION_RATE_BONUSES: [u16; 3] = [0, 150, 300]; // +0% / +1.5% / +3%

/// One-time cash bonus brackets (USD cents). Paid only on non-minimum
/// durations; deposits below the lower bracket get nothing.
pub const CASH_BONUS_LOWER_THRESHOLD: u64 = 50_000; // $500
pub const CASH_BONUS_UPPER_THRESHOLD: u64 = 100_000; // $1,000
pub const CASH_BONUS_LOWER: u64 = 20_000; // $200
pub const CASH_BONUS_UPPER: u64 = 50_000; // $500

// ============================================================================
// ACCRUAL
// ============================================================================

/// Basis points denominator
pub const BASIS_POINTS: u64 = 10_000;

/// Seconds in one accrual day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Accounting month length in days; maturity = duration_months * 30
pub const DAYS_PER_MONTH: i64 = 30;

// ============================================================================
// REFERRAL PROGRAM
// ============================================================================

/// Referral chain depth (direct + one indirect level)
pub const MAX_REFERRAL_LEVELS: u8 = 2;

/// Flat commission percent for level-2 referees
pub const LEVEL2_COMMISSION_PERCENT: u8 = 3;

// ============================================================================
// LIMITS
// ============================================================================

/// Maximum investments per investor account
pub const MAX_INVESTMENTS_PER_INVESTOR: u64 = 20;

/// Longest rejection reason an approver may attach
pub const MAX_REJECTION_REASON_LEN: usize = 200;

// ============================================================================
// PDA SEEDS
// ============================================================================

pub const ENGINE_STATE_SEED: &[u8] = b"engine_state";
pub const ENGINE_CONFIG_SEED: &[u8] = b"engine_config";
pub const INVESTOR_SEED: &[u8] = b"investor";
pub const INVESTMENT_SEED: &[u8] = b"investment";
pub const WITHDRAWAL_SEED: &[u8] = b"withdrawal";
pub const REFERRAL_EDGE_SEED: &[u8] = b"referral_edge";
pub const REFERRAL_EARNING_SEED: &[u8] = b"referral_earning";
