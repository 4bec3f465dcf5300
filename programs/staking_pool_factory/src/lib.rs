use anchor_lang::prelude::*;

declare_id!("9mWo7aDGKVjtN5yMGZ8rGDbAvxT5GhXgnG9u8vJ8qXqN");

pub mod constants;
pub mod error;
pub mod escrow;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use instructions::*;

#[program]
pub mod staking_pool_factory {
    use super::*;

    /// `vesting_duration` defaults to one year when omitted.
    pub fn initialize_factory(
        ctx: Context<InitializeFactory>,
        funder: Pubkey,
        vesting_duration: Option<i64>,
    ) -> Result<()> {
        instructions::initialize_factory(ctx, funder, vesting_duration)
    }

    pub fn set_funder(ctx: Context<SetFunder>, new_funder: Pubkey) -> Result<()> {
        instructions::set_funder(ctx, new_funder)
    }

    pub fn deploy_pool(
        ctx: Context<DeployPool>,
        start_time: i64,
        round_duration_days: u64,
    ) -> Result<Pubkey> {
        instructions::deploy_pool(ctx, start_time, round_duration_days)
    }

    pub fn get_staking_pool_address(ctx: Context<GetStakingPoolAddress>) -> Result<Pubkey> {
        instructions::get_staking_pool_address(ctx)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }

    pub fn stake_native(ctx: Context<StakeNative>, amount: u64) -> Result<()> {
        instructions::stake_native(ctx, amount)
    }

    pub fn withdraw_native(ctx: Context<WithdrawNative>, amount: u64) -> Result<()> {
        instructions::withdraw_native(ctx, amount)
    }

    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim(ctx)
    }

    /// Funder only. Rolls any undistributed budget of the running period
    /// into the new rate.
    pub fn notify_reward_amount(
        ctx: Context<NotifyRewardAmount>,
        amount: u64,
        duration: i64,
    ) -> Result<()> {
        instructions::notify_reward_amount(ctx, amount, duration)
    }

    pub fn release_vested(ctx: Context<ReleaseVested>) -> Result<()> {
        instructions::release_vested(ctx)
    }

    pub fn reward_per_token(ctx: Context<PoolView>) -> Result<u128> {
        instructions::reward_per_token(ctx)
    }

    pub fn earned(ctx: Context<StakerView>) -> Result<u64> {
        instructions::earned(ctx)
    }

    pub fn total_staked(ctx: Context<PoolView>) -> Result<u64> {
        instructions::total_staked(ctx)
    }
}
