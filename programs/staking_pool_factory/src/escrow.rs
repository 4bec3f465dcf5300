use anchor_lang::prelude::*;
use crate::error::StakingError;
use crate::state::VestingEscrow;

/// Destination for claimed rewards. Rewards are credited to a vesting
/// schedule, never paid out as liquid tokens directly.
pub trait RewardSink {
    fn credit_vesting(&mut self, beneficiary: &Pubkey, amount: u64, now: i64) -> Result<()>;
}

impl RewardSink for VestingEscrow {
    fn credit_vesting(&mut self, beneficiary: &Pubkey, amount: u64, now: i64) -> Result<()> {
        require_keys_eq!(self.beneficiary, *beneficiary, StakingError::Unauthorized);
        self.credit(amount, now)
    }
}
