use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::StakingError;
use crate::escrow::RewardSink;
use crate::state::Staker;

/// Derived lifecycle of a pool. Nothing here is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolPhase {
    /// `now < start_time`
    Pending,
    /// Started, with a funded period still running.
    Active,
    /// Started, but no reward is being distributed right now.
    Starved,
}

/// Accumulator state as of some `now`, not yet written back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accrual {
    pub reward_per_token: u128,
    pub undistributed_reward: u128,
}

/// Reward-accrual engine for a single stake mint.
///
/// Rewards are tracked with a reward-per-token accumulator that is
/// checkpointed lazily by every state-changing call, so nothing ever
/// iterates over stakers. All math floors.
#[account]
#[derive(Default, Debug, PartialEq, InitSpace)]
pub struct StakingPool {
    pub factory: Pubkey,               // Factory that deployed this pool
    pub stake_mint: Pubkey,            // Token accepted for staking
    pub stake_vault: Pubkey,           // Custody of staked tokens
    pub reward_vault: Pubkey,          // Funded, not yet claimed rewards
    pub escrow_vault: Pubkey,          // Claimed rewards that are still vesting
    pub start_time: i64,               // Nothing accrues before this
    pub round_duration: i64,           // Seconds per round
    pub total_staked: u64,             // Sum of all staker balances
    pub reward_per_token_stored: u128, // Scaled by REWARD_PRECISION
    pub last_update_time: i64,         // Last checkpoint
    pub reward_rate: u64,              // Reward base units per second
    pub period_end: i64,               // End of the funded period
    pub total_funded: u128,            // Cumulative notified budgets
    pub total_paid: u128,              // Cumulative claimed rewards
    pub undistributed_reward: u128,    // Budget no staker earned, carried into the next funding
    pub is_native: bool,               // Stakes wrapped SOL, with lamport entry points
    pub reentrancy_guard: bool,        // Set while a mutator is running
    pub bump: u8,
    pub stake_vault_bump: u8,
    pub reward_vault_bump: u8,
    pub escrow_vault_bump: u8,
}

impl StakingPool {
    pub fn is_registered(&self) -> bool {
        self.factory != Pubkey::default()
    }

    /// First and only initialization of a pool record.
    pub fn initialize(
        &mut self,
        factory: Pubkey,
        stake_mint: Pubkey,
        start_time: i64,
        round_duration_days: u64,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_registered(), StakingError::DuplicatePool);
        require!(start_time >= 0, StakingError::InvalidStartTime);
        require!(
            round_duration_days > 0 && round_duration_days <= MAX_ROUND_DURATION_DAYS,
            StakingError::InvalidRoundDuration
        );

        *self = StakingPool {
            factory,
            stake_mint,
            start_time,
            round_duration: round_duration_days as i64 * SECONDS_PER_DAY,
            last_update_time: start_time,
            bump,
            ..Default::default()
        };
        Ok(())
    }

    pub fn phase(&self, now: i64) -> PoolPhase {
        if now < self.start_time {
            PoolPhase::Pending
        } else if self.reward_rate == 0 || now >= self.period_end {
            PoolPhase::Starved
        } else {
            PoolPhase::Active
        }
    }

    /// Zero-based round index containing `now`, `None` before the start.
    pub fn current_round(&self, now: i64) -> Option<u64> {
        if now < self.start_time || self.round_duration <= 0 {
            return None;
        }
        Some(((now - self.start_time) / self.round_duration) as u64)
    }

    pub fn last_time_reward_applicable(&self, now: i64) -> i64 {
        now.min(self.period_end)
    }

    /// Distributes everything emitted since the last checkpoint. With nobody
    /// staked the emission goes to `undistributed_reward` instead.
    pub fn accrue(&self, now: i64) -> Result<Accrual> {
        let unchanged = Accrual {
            reward_per_token: self.reward_per_token_stored,
            undistributed_reward: self.undistributed_reward,
        };
        let applicable = self.last_time_reward_applicable(now);
        if applicable <= self.last_update_time {
            return Ok(unchanged);
        }

        // elapsed <= funded duration, so the emission stays within the
        // funded budget and the scaled product fits in u128.
        let elapsed = (applicable - self.last_update_time) as u128;
        let emitted = elapsed
            .checked_mul(u128::from(self.reward_rate))
            .ok_or(StakingError::MathOverflow)?;

        if self.total_staked == 0 {
            return Ok(Accrual {
                undistributed_reward: self
                    .undistributed_reward
                    .checked_add(emitted)
                    .ok_or(StakingError::MathOverflow)?,
                ..unchanged
            });
        }

        let increment = emitted
            .checked_mul(REWARD_PRECISION)
            .ok_or(StakingError::MathOverflow)?
            / u128::from(self.total_staked);
        Ok(Accrual {
            reward_per_token: self
                .reward_per_token_stored
                .checked_add(increment)
                .ok_or(StakingError::MathOverflow)?,
            ..unchanged
        })
    }

    /// Accumulator value as of `now`, without writing it back.
    pub fn reward_per_token(&self, now: i64) -> Result<u128> {
        Ok(self.accrue(now)?.reward_per_token)
    }

    pub fn earned(&self, staker: &Staker, now: i64) -> Result<u64> {
        staker.pending_reward(self.reward_per_token(now)?)
    }

    /// Writes the accumulator forward to `now`.
    pub fn checkpoint(&mut self, now: i64) -> Result<u128> {
        let accrual = self.accrue(now)?;
        self.commit_checkpoint(accrual, now);
        Ok(accrual.reward_per_token)
    }

    fn commit_checkpoint(&mut self, accrual: Accrual, now: i64) {
        self.reward_per_token_stored = accrual.reward_per_token;
        self.undistributed_reward = accrual.undistributed_reward;
        self.last_update_time = self
            .last_update_time
            .max(self.last_time_reward_applicable(now));
    }

    pub fn stake(&mut self, staker: &mut Staker, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, StakingError::ZeroAmount);
        require!(now >= self.start_time, StakingError::NotStarted);

        let accrual = self.accrue(now)?;
        let accrued = staker.pending_reward(accrual.reward_per_token)?;
        let balance = staker
            .balance
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.commit_checkpoint(accrual, now);
        staker.record_settlement(accrual.reward_per_token, accrued);
        staker.balance = balance;
        self.total_staked = total_staked;
        Ok(())
    }

    pub fn withdraw(&mut self, staker: &mut Staker, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, StakingError::ZeroAmount);
        require!(now >= self.start_time, StakingError::NotStarted);
        require!(amount <= staker.balance, StakingError::InsufficientBalance);

        let accrual = self.accrue(now)?;
        let accrued = staker.pending_reward(accrual.reward_per_token)?;
        let total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.commit_checkpoint(accrual, now);
        staker.record_settlement(accrual.reward_per_token, accrued);
        staker.balance -= amount;
        self.total_staked = total_staked;
        Ok(())
    }

    /// Settles `staker` and hands everything it earned to `sink`.
    /// Returns the amount credited.
    pub fn claim(
        &mut self,
        staker: &mut Staker,
        sink: &mut impl RewardSink,
        now: i64,
    ) -> Result<u64> {
        let accrual = self.accrue(now)?;
        let reward = staker.pending_reward(accrual.reward_per_token)?;
        let total_paid = self
            .total_paid
            .checked_add(u128::from(reward))
            .ok_or(StakingError::MathOverflow)?;

        if reward > 0 {
            sink.credit_vesting(&staker.owner, reward, now)?;
        }

        self.commit_checkpoint(accrual, now);
        staker.record_settlement(accrual.reward_per_token, 0);
        self.total_paid = total_paid;
        Ok(reward)
    }

    /// Starts a new funded period of `duration` seconds. Whatever the running
    /// period has not emitted yet, and everything emitted while nobody was
    /// staked, is rolled into the new rate.
    ///
    /// `available` is the funder's reward-token balance. Returns the new rate.
    pub fn notify_reward_amount(
        &mut self,
        amount: u64,
        duration: i64,
        now: i64,
        available: u64,
    ) -> Result<u64> {
        require!(amount > 0, StakingError::ZeroAmount);
        require!(duration > 0, StakingError::InvalidDuration);
        require!(amount <= available, StakingError::InsufficientRewardBalance);

        let accrual = self.accrue(now)?;

        // Funding ahead of the start schedules the period from start_time.
        let begin = now.max(self.start_time);
        let remaining = if self.period_end > begin {
            ((self.period_end - begin) as u128)
                .checked_mul(u128::from(self.reward_rate))
                .ok_or(StakingError::MathOverflow)?
        } else {
            0
        };
        let budget = u128::from(amount)
            .checked_add(remaining)
            .and_then(|b| b.checked_add(accrual.undistributed_reward))
            .ok_or(StakingError::MathOverflow)?;
        let rate = budget / duration as u128;
        require!(rate > 0, StakingError::RewardTooSmall);
        // The flooring remainder waits for the next funding.
        let leftover = budget - rate * duration as u128;
        let rate = u64::try_from(rate).map_err(|_| error!(StakingError::MathOverflow))?;
        let period_end = begin
            .checked_add(duration)
            .ok_or(StakingError::MathOverflow)?;
        let total_funded = self
            .total_funded
            .checked_add(u128::from(amount))
            .ok_or(StakingError::MathOverflow)?;

        self.commit_checkpoint(accrual, now);
        self.undistributed_reward = leftover;
        self.reward_rate = rate;
        self.period_end = period_end;
        self.last_update_time = begin;
        self.total_funded = total_funded;
        Ok(rate)
    }

    pub fn enter(&mut self) -> Result<()> {
        require!(!self.reentrancy_guard, StakingError::ReentrancyGuard);
        self.reentrancy_guard = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.reentrancy_guard = false;
    }
}
