use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::state::{StakingPool, VestingEscrow};
use crate::utils::{transfer_from_pool, with_reentrancy_guard};

/// Pays out everything that has vested so far from the pool's escrow vault.
pub fn release_vested(ctx: Context<ReleaseVested>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let beneficiary = ctx.accounts.beneficiary.key();
    let ReleaseVested {
        pool,
        vesting_escrow,
        escrow_vault,
        beneficiary_tokens,
        token_program,
        ..
    } = ctx.accounts;

    let amount = with_reentrancy_guard(pool, |pool| {
        let amount = vesting_escrow.release(now)?;
        vesting_escrow.exit(&crate::ID)?;

        transfer_from_pool(token_program, pool, escrow_vault, beneficiary_tokens, amount)?;
        Ok(amount)
    })?;

    emit!(VestingReleased {
        pool: pool.key(),
        beneficiary,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseVested<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.factory.as_ref(), pool.stake_mint.as_ref()],
        bump = pool.bump,
        has_one = escrow_vault
    )]
    pub pool: Account<'info, StakingPool>,

    #[account(
        mut,
        seeds = [VESTING_SEED, pool.key().as_ref(), beneficiary.key().as_ref()],
        bump = vesting_escrow.bump,
        has_one = pool,
        has_one = beneficiary @ StakingError::Unauthorized
    )]
    pub vesting_escrow: Account<'info, VestingEscrow>,

    #[account(mut)]
    pub escrow_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = escrow_vault.mint,
        token::authority = beneficiary
    )]
    pub beneficiary_tokens: Box<Account<'info, TokenAccount>>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}
