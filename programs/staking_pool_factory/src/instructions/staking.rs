use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::state::{Staker, StakingPool};
use crate::utils::{transfer_from_pool, transfer_from_user, with_reentrancy_guard};

/// --------------------------------------------
/// STAKE TOKENS
/// --------------------------------------------
/// The staker record is opened on the first deposit.
pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let staker_bump = ctx.bumps.staker;
    let Stake {
        pool,
        staker,
        owner_tokens,
        stake_vault,
        owner,
        token_program,
        ..
    } = ctx.accounts;

    if !staker.is_initialized() {
        staker.open(pool.key(), owner.key(), staker_bump);
    }

    with_reentrancy_guard(pool, |pool| {
        pool.stake(staker, amount, now)?;
        pool.exit(&crate::ID)?;
        staker.exit(&crate::ID)?;

        transfer_from_user(token_program, owner_tokens, stake_vault, owner, amount)
    })?;

    emit!(Staked {
        pool: pool.key(),
        account: owner.key(),
        amount,
    });

    Ok(())
}

/// --------------------------------------------
/// WITHDRAW TOKENS
/// --------------------------------------------
pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let Withdraw {
        pool,
        staker,
        owner_tokens,
        stake_vault,
        owner,
        token_program,
    } = ctx.accounts;

    with_reentrancy_guard(pool, |pool| {
        pool.withdraw(staker, amount, now)?;
        pool.exit(&crate::ID)?;
        staker.exit(&crate::ID)?;

        transfer_from_pool(token_program, pool, stake_vault, owner_tokens, amount)
    })?;

    emit!(Withdrawn {
        pool: pool.key(),
        account: owner.key(),
        amount,
    });

    Ok(())
}

// -----------------------------------
// ACCOUNTS STRUCTS
// -----------------------------------

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump,
        has_one = stake_vault
    )]
    pub pool: Account<'info, StakingPool>,

    #[account(
        init_if_needed,
        payer = owner,
        seeds = [STAKER_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump,
        space = 8 + Staker::INIT_SPACE
    )]
    pub staker: Account<'info, Staker>,

    #[account(
        mut,
        token::mint = pool.stake_mint,
        token::authority = owner
    )]
    pub owner_tokens: Account<'info, TokenAccount>,

    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump,
        has_one = stake_vault
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
        mut,
        token::mint = pool.stake_mint,
        token::authority = owner
    )]
    pub owner_tokens: Account<'info, TokenAccount>,

    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
