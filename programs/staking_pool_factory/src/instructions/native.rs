use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::state::{Staker, StakingPool};
use crate::utils::{unwrap_from_pool, with_reentrancy_guard, wrap_lamports};

/// --------------------------------------------
/// STAKE NATIVE SOL
/// --------------------------------------------
/// Wraps `amount` lamports straight into the native pool's vault. The
/// position is the same one `stake` keeps for wrapped SOL.
pub fn stake_native(ctx: Context<StakeNative>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let staker_bump = ctx.bumps.staker;
    let StakeNative {
        pool,
        staker,
        stake_vault,
        owner,
        token_program,
        system_program,
    } = ctx.accounts;

    if !staker.is_initialized() {
        staker.open(pool.key(), owner.key(), staker_bump);
    }

    with_reentrancy_guard(pool, |pool| {
        pool.stake(staker, amount, now)?;
        pool.exit(&crate::ID)?;
        staker.exit(&crate::ID)?;

        wrap_lamports(system_program, token_program, owner, stake_vault, amount)
    })?;

    emit!(Staked {
        pool: pool.key(),
        account: owner.key(),
        amount,
    });

    Ok(())
}

/// --------------------------------------------
/// WITHDRAW NATIVE SOL
/// --------------------------------------------
/// Unwraps `amount` from the native pool's vault and pays it out as lamports.
pub fn withdraw_native(ctx: Context<WithdrawNative>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let WithdrawNative {
        pool,
        staker,
        stake_vault,
        unwrap_account,
        owner,
        token_program,
        ..
    } = ctx.accounts;

    with_reentrancy_guard(pool, |pool| {
        pool.withdraw(staker, amount, now)?;
        pool.exit(&crate::ID)?;
        staker.exit(&crate::ID)?;

        unwrap_from_pool(
            token_program,
            pool,
            stake_vault,
            unwrap_account,
            &owner.to_account_info(),
            amount,
        )
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
pub struct StakeNative<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump,
        has_one = stake_vault,
        constraint = pool.is_native @ StakingError::NotNativePool
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

    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct WithdrawNative<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump,
        has_one = stake_vault,
        constraint = pool.is_native @ StakingError::NotNativePool
    )]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        seeds = [STAKER_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump = staker.bump,
        has_one = pool,
        has_one = owner @ StakingError::Unauthorized
    )]
    pub staker: Box<Account<'info, Staker>>,

    #[account(mut)]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(address = pool.stake_mint)]
    pub native_mint: Box<Account<'info, Mint>>,

    /// Created and closed within the instruction; its lamports end up with
    /// `owner`.
    #[account(
        init,
        payer = owner,
        seeds = [UNWRAP_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump,
        token::mint = native_mint,
        token::authority = pool
    )]
    pub unwrap_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
