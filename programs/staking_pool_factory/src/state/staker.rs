use anchor_lang::prelude::*;
use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// One staker's position in a pool.
///
/// Created lazily on the first stake and kept after a withdraw-to-zero so
/// that unclaimed rewards survive.
#[account]
#[derive(Default, Debug, PartialEq, InitSpace)]
pub struct Staker {
    pub pool: Pubkey,                // Pool this position belongs to
    pub owner: Pubkey,               // Wallet that staked
    pub balance: u64,                // Currently staked amount
    pub reward_per_token_paid: u128, // Accumulator snapshot at last settlement
    pub accrued_reward: u64,         // Earned, not yet claimed
    pub bump: u8,
}

impl Staker {
    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn open(&mut self, pool: Pubkey, owner: Pubkey, bump: u8) {
        self.pool = pool;
        self.owner = owner;
        self.balance = 0;
        self.reward_per_token_paid = 0;
        self.accrued_reward = 0;
        self.bump = bump;
    }

    /// Rewards owed at accumulator value `reward_per_token`, including what
    /// was already settled into `accrued_reward`. Floors.
    pub fn pending_reward(&self, reward_per_token: u128) -> Result<u64> {
        let delta = reward_per_token
            .checked_sub(self.reward_per_token_paid)
            .ok_or(StakingError::MathOverflow)?;
        let fresh = u128::from(self.balance)
            .checked_mul(delta)
            .ok_or(StakingError::MathOverflow)?
            / REWARD_PRECISION;
        let total = fresh
            .checked_add(u128::from(self.accrued_reward))
            .ok_or(StakingError::MathOverflow)?;
        u64::try_from(total).map_err(|_| error!(StakingError::MathOverflow))
    }

    /// Moves the snapshot to `reward_per_token` with `accrued` already owed.
    /// The pool computes `accrued` with `pending_reward` before committing.
    pub(crate) fn record_settlement(&mut self, reward_per_token: u128, accrued: u64) {
        self.reward_per_token_paid = reward_per_token;
        self.accrued_reward = accrued;
    }
}
