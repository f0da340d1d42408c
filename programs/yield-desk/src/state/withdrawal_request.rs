// state/withdrawal_request.rs
use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::YieldDeskError;
use crate::utils::validation::validate_rejection_reason;

/// The four request kinds share one PENDING/APPROVED/REJECTED workflow; the
/// kind tag only decides how the payout was computed and which ledger
/// mutation an approval applies.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WithdrawalKind {
    /// Part of the available profit, amount chosen by the investor
    Partial,
    /// Principal back before maturity, accrued interest forfeited
    Early,
    /// Principal plus remaining profit at maturity
    Full,
    /// Payout of one unpaid referral earning
    ReferralBonus,
}

impl WithdrawalKind {
    pub fn name(&self) -> &'static str {
        match self {
            WithdrawalKind::Partial => "partial",
            WithdrawalKind::Early => "early",
            WithdrawalKind::Full => "full",
            WithdrawalKind::ReferralBonus => "referral_bonus",
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[account]
pub struct WithdrawalRequest {
    pub investment: Pubkey,
    /// Who asked: the investment owner, or the referrer for a bonus payout
    pub requested_by: Pubkey,
    /// Position in the investment's request history; part of the PDA seeds
    pub index: u64,
    pub kind: WithdrawalKind,
    /// Investor-chosen amount, only meaningful for partial requests
    pub requested_amount: Option<u64>,
    /// Payout fixed at creation time (USD cents)
    pub computed_amount: u64,
    pub status: RequestStatus,
    /// Referral earning this request pays out, bonus kind only
    pub earning: Option<Pubkey>,
    pub created_at: i64,
    pub processed_at: Option<i64>,
    pub processed_by: Option<Pubkey>,
    pub rejection_reason: Option<String>,
    pub bump: u8,
}

impl WithdrawalRequest {
    /// Size for account allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // investment
        32 + // requested_by
        8 + // index
        1 + // kind
        9 + // requested_amount Option<u64>
        8 + // computed_amount
        1 + // status
        33 + // earning Option<Pubkey>
        8 + // created_at
        9 + // processed_at Option<i64>
        33 + // processed_by Option<Pubkey>
        4 + 1 + MAX_REJECTION_REASON_LEN + // rejection_reason
        1 + // bump
        64; // spare

    /// Create a new pending request
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        investment: Pubkey,
        requested_by: Pubkey,
        index: u64,
        kind: WithdrawalKind,
        requested_amount: Option<u64>,
        computed_amount: u64,
        earning: Option<Pubkey>,
        created_at: i64,
        bump: u8,
    ) -> Self {
        Self {
            investment,
            requested_by,
            index,
            kind,
            requested_amount,
            computed_amount,
            status: RequestStatus::Pending,
            earning,
            created_at,
            processed_at: None,
            processed_by: None,
            rejection_reason: None,
            bump,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Gate an approval attempt. `Ok(true)` means proceed with the ledger
    /// mutation; `Ok(false)` means this request was already approved and the
    /// retry must be a no-op (at-least-once delivery from the notification
    /// channel). Approving a rejected request is a hard error.
    pub fn begin_approval(&self) -> Result<bool> {
        match self.status {
            RequestStatus::Pending => Ok(true),
            RequestStatus::Approved => Ok(false),
            RequestStatus::Rejected => Err(YieldDeskError::RequestAlreadyRejected.into()),
        }
    }

    /// Gate a rejection attempt, mirroring `begin_approval`
    pub fn begin_rejection(&self) -> Result<bool> {
        match self.status {
            RequestStatus::Pending => Ok(true),
            RequestStatus::Rejected => Ok(false),
            RequestStatus::Approved => Err(YieldDeskError::RequestAlreadyApproved.into()),
        }
    }

    pub fn mark_approved(&mut self, approver: Pubkey, now: i64) {
        self.status = RequestStatus::Approved;
        self.processed_at = Some(now);
        self.processed_by = Some(approver);
    }

    pub fn mark_rejected(&mut self, approver: Pubkey, now: i64, reason: String) -> Result<()> {
        validate_rejection_reason(&reason)?;
        self.status = RequestStatus::Rejected;
        self.processed_at = Some(now);
        self.processed_by = Some(approver);
        self.rejection_reason = Some(reason);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_partial() -> WithdrawalRequest {
        WithdrawalRequest::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            0,
            WithdrawalKind::Partial,
            Some(5_000),
            5_000,
            None,
            1_700_000_000,
            254,
        )
    }

    #[test]
    fn approval_from_pending_proceeds_once() {
        let mut request = pending_partial();
        assert!(request.begin_approval().unwrap());

        let approver = Pubkey::new_unique();
        request.mark_approved(approver, 1_700_100_000);

        // retry observes the terminal status and becomes a no-op
        assert!(!request.begin_approval().unwrap());
        assert_eq!(request.processed_by, Some(approver));
        assert_eq!(request.processed_at, Some(1_700_100_000));
    }

    #[test]
    fn approving_a_rejected_request_is_an_error() {
        let mut request = pending_partial();
        request
            .mark_rejected(Pubkey::new_unique(), 1_700_100_000, "bad trc20 address".into())
            .unwrap();
        assert!(request.begin_approval().is_err());
    }

    #[test]
    fn rejecting_an_approved_request_is_an_error() {
        let mut request = pending_partial();
        request.mark_approved(Pubkey::new_unique(), 1_700_100_000);
        assert!(request.begin_rejection().is_err());
        // but rejecting again after a rejection is a tolerated retry
        let mut rejected = pending_partial();
        rejected
            .mark_rejected(Pubkey::new_unique(), 1_700_100_000, "duplicate".into())
            .unwrap();
        assert!(!rejected.begin_rejection().unwrap());
    }

    #[test]
    fn rejection_keeps_the_reason() {
        let mut request = pending_partial();
        request
            .mark_rejected(Pubkey::new_unique(), 1_700_100_000, "kyc expired".into())
            .unwrap();
        assert_eq!(request.rejection_reason.as_deref(), Some("kyc expired"));
        assert!(!request.is_pending());
    }

    #[test]
    fn empty_reason_is_rejected() {
        let mut request = pending_partial();
        assert!(request
            .mark_rejected(Pubkey::new_unique(), 1_700_100_000, "  ".into())
            .is_err());
        assert!(request.is_pending());
    }
}
