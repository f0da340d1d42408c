// Instructions module exports
pub mod accrual;
pub mod admin;
pub mod create_investment;
pub mod create_investor;
pub mod initialize;
pub mod process_withdrawal;
pub mod referral;
pub mod reinvest;
pub mod request_withdrawal;

pub use accrual::*;
pub use admin::*;
pub use create_investment::*;
pub use create_investor::*;
pub use initialize::*;
pub use process_withdrawal::*;
pub use referral::*;
pub use reinvest::*;
pub use request_withdrawal::*;
