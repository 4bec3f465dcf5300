use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::state::{Staker, StakingPool, StakingPoolFactory, VestingEscrow};
use crate::utils::{transfer_from_pool, transfer_from_user, with_reentrancy_guard};

/// --------------------------------------------
/// CLAIM REWARDS
/// --------------------------------------------
/// Earned rewards go to the caller's vesting escrow, not to their wallet.
pub fn claim(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vesting_bump = ctx.bumps.vesting_escrow;
    let vesting_duration = ctx.accounts.factory.vesting_duration;
    let Claim {
        pool,
        staker,
        vesting_escrow,
        reward_vault,
        escrow_vault,
        owner,
        token_program,
        ..
    } = ctx.accounts;

    if !vesting_escrow.is_initialized() {
        vesting_escrow.open(pool.key(), owner.key(), vesting_duration, vesting_bump);
    }

    let reward = with_reentrancy_guard(pool, |pool| {
        let reward = pool.claim(staker, &mut **vesting_escrow, now)?;
        pool.exit(&crate::ID)?;
        staker.exit(&crate::ID)?;
        vesting_escrow.exit(&crate::ID)?;

        if reward > 0 {
            transfer_from_pool(token_program, pool, reward_vault, escrow_vault, reward)?;
        }
        Ok(reward)
    })?;

    if reward > 0 {
        emit!(RewardPaid {
            pool: pool.key(),
            account: owner.key(),
            amount: reward,
        });
    }

    Ok(())
}

/// --------------------------------------------
/// NOTIFY REWARD AMOUNT
/// --------------------------------------------
/// Funds a new reward period of `duration` seconds. Funder only.
pub fn notify_reward_amount(
    ctx: Context<NotifyRewardAmount>,
    amount: u64,
    duration: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    require_keys_eq!(
        ctx.accounts.factory.funder,
        ctx.accounts.funder.key(),
        StakingError::Unauthorized
    );
    let available = ctx.accounts.funder_tokens.amount;
    let NotifyRewardAmount {
        pool,
        funder_tokens,
        reward_vault,
        funder,
        token_program,
        ..
    } = ctx.accounts;

    let reward_rate = with_reentrancy_guard(pool, |pool| {
        let reward_rate = pool.notify_reward_amount(amount, duration, now, available)?;
        pool.exit(&crate::ID)?;

        transfer_from_user(token_program, funder_tokens, reward_vault, funder, amount)?;
        Ok(reward_rate)
    })?;

    msg!(
        "notify_reward_amount: {} over {}s, rate {}/s until {}",
        amount,
        duration,
        reward_rate,
        pool.period_end
    );
    emit!(RewardFunded {
        pool: pool.key(),
        amount,
        duration,
        reward_rate,
        period_end: pool.period_end,
        round: pool.current_round(now),
    });

    Ok(())
}

// -----------------------------------
// ACCOUNTS STRUCTS
// -----------------------------------

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(seeds = [FACTORY_SEED, factory.reward_mint.as_ref()], bump = factory.bump)]
    pub factory: Box<Account<'info, StakingPoolFactory>>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump,
        has_one = factory,
        has_one = reward_vault,
        has_one = escrow_vault
    )]
    pub pool: Account<'info, StakingPool>,

    #[account(
        mut,
        seeds = [STAKER_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump = staker.bump,
        has_one = pool,
        has_one = owner @ StakingError::Unauthorized
    )]
    pub staker: Account<'info, Staker>,

    #[account(
        init_if_needed,
        payer = owner,
        seeds = [VESTING_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump,
        space = 8 + VestingEscrow::INIT_SPACE
    )]
    pub vesting_escrow: Account<'info, VestingEscrow>,

    #[account(mut)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub escrow_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct NotifyRewardAmount<'info> {
    #[account(seeds = [FACTORY_SEED, factory.reward_mint.as_ref()], bump = factory.bump)]
    pub factory: Box<Account<'info, StakingPoolFactory>>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump,
        has_one = factory,
        has_one = reward_vault
    )]
    pub pool: Account<'info, StakingPool>,

    /// The funder's reward-token account; its balance caps `amount`.
    #[account(
        mut,
        token::mint = factory.reward_mint,
        token::authority = funder
    )]
    pub funder_tokens: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub funder: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
