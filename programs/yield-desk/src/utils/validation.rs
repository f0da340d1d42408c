// utils/validation.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;

/// Validate a lock-in duration against the allowed choices
pub fn validate_duration(duration_months: u8) -> Result<()> {
    if !DURATION_CHOICES.contains(&duration_months) {
        return Err(YieldDeskError::InvalidDuration.into());
    }
    Ok(())
}

/// Validate a referrer link before it is recorded
pub fn validate_referrer(owner: Pubkey, referrer: Option<Pubkey>) -> Result<()> {
    if let Some(referrer_key) = referrer {
        if referrer_key == owner {
            return Err(YieldDeskError::CannotReferYourself.into());
        }
        if referrer_key == Pubkey::default() {
            return Err(YieldDeskError::InvalidReferrer.into());
        }
    }
    Ok(())
}

/// Validate a rejection reason before it is stored on the request
pub fn validate_rejection_reason(reason: &str) -> Result<()> {
    if reason.trim().is_empty() || reason.len() > MAX_REJECTION_REASON_LEN {
        return Err(YieldDeskError::InvalidReason.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_configured_durations() {
        assert!(validate_duration(3).is_ok());
        assert!(validate_duration(6).is_ok());
        assert!(validate_duration(12).is_ok());
        assert!(validate_duration(9).is_err());
        assert!(validate_duration(0).is_err());
    }

    #[test]
    fn rejects_self_referral() {
        let me = Pubkey::new_unique();
        assert!(validate_referrer(me, Some(me)).is_err());
        assert!(validate_referrer(me, Some(Pubkey::new_unique())).is_ok());
        assert!(validate_referrer(me, None).is_ok());
    }

    #[test]
    fn bounds_rejection_reason() {
        assert!(validate_rejection_reason("insufficient KYC documents").is_ok());
        assert!(validate_rejection_reason("   ").is_err());
        assert!(validate_rejection_reason(&"x".repeat(MAX_REJECTION_REASON_LEN + 1)).is_err());
    }
}
