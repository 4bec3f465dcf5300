use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::{Staker, StakingPool};

// Read-only instructions. Results come back as return data, which clients
// read by simulating the transaction.

pub fn reward_per_token(ctx: Context<PoolView>) -> Result<u128> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.pool.reward_per_token(now)
}

pub fn total_staked(ctx: Context<PoolView>) -> Result<u64> {
    Ok(ctx.accounts.pool.total_staked)
}

pub fn earned(ctx: Context<StakerView>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.pool.earned(&ctx.accounts.staker, now)
}

#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, StakingPool>,
}

#[derive(Accounts)]
pub struct StakerView<'info> {
    #[account(
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, StakingPool>,

    #[account(
        seeds = [STAKER_SEED, pool.key().as_ref(), staker.owner.as_ref()],
        bump = staker.bump,
        has_one = pool
    )]
    pub staker: Account<'info, Staker>,
}
