use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::pda::{pool_pda, registry_mint};
use crate::state::{StakingPool, StakingPoolFactory};

/// --------------------------------------------
/// INITIALIZE FACTORY
/// --------------------------------------------
pub fn initialize_factory(
    ctx: Context<InitializeFactory>,
    funder: Pubkey,
    vesting_duration: Option<i64>,
) -> Result<()> {
    let vesting_duration = vesting_duration.unwrap_or(DEFAULT_VESTING_DURATION);
    let authority = ctx.accounts.authority.key();
    let reward_mint = ctx.accounts.reward_mint.key();
    let native_mint = ctx.accounts.native_mint.key();
    let factory = &mut ctx.accounts.factory;

    factory.initialize(
        authority,
        funder,
        reward_mint,
        native_mint,
        vesting_duration,
        ctx.bumps.factory,
    )?;

    emit!(FactoryInitialized {
        factory: factory.key(),
        authority,
        funder,
        reward_mint,
        native_mint,
        vesting_duration,
    });

    Ok(())
}

pub fn set_funder(ctx: Context<SetFunder>, new_funder: Pubkey) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    let old_funder = factory.set_funder(&ctx.accounts.authority.key(), new_funder)?;

    emit!(FunderUpdated {
        factory: factory.key(),
        old_funder,
        new_funder,
    });

    Ok(())
}

/// --------------------------------------------
/// DEPLOY POOL
/// --------------------------------------------
/// Creates the pool for `stake_mint` at its precomputable PDA, together with
/// its three vaults. Returns the pool address.
pub fn deploy_pool(
    ctx: Context<DeployPool>,
    start_time: i64,
    round_duration_days: u64,
) -> Result<Pubkey> {
    let factory_key = ctx.accounts.factory.key();
    let pool_key = ctx.accounts.pool.key();
    let stake_mint = ctx.accounts.stake_mint.key();

    ctx.accounts.factory.deploy_pool(
        factory_key,
        &mut ctx.accounts.pool,
        stake_mint,
        start_time,
        round_duration_days,
        ctx.bumps.pool,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.stake_vault = ctx.accounts.stake_vault.key();
    pool.reward_vault = ctx.accounts.reward_vault.key();
    pool.escrow_vault = ctx.accounts.escrow_vault.key();
    pool.stake_vault_bump = ctx.bumps.stake_vault;
    pool.reward_vault_bump = ctx.bumps.reward_vault;
    pool.escrow_vault_bump = ctx.bumps.escrow_vault;

    msg!(
        "deploy_pool: mint {} -> pool {} (native: {})",
        stake_mint,
        pool_key,
        pool.is_native
    );
    emit!(PoolDeployed {
        stake_mint,
        pool: pool_key,
        start_time,
        round_duration: pool.round_duration,
        native: pool.is_native,
    });

    Ok(pool_key)
}

/// Registered pool for `stake_mint`, or the zero address when none exists.
/// The zero address as `stake_mint` looks up the native pool.
pub fn get_staking_pool_address(ctx: Context<GetStakingPoolAddress>) -> Result<Pubkey> {
    let mint = registry_mint(&ctx.accounts.stake_mint.key());
    let (expected, _) = pool_pda(&ctx.accounts.factory.key(), &mint);
    let pool = &ctx.accounts.pool;
    require_keys_eq!(pool.key(), expected, StakingError::PoolAddressMismatch);

    if pool.owner == &crate::ID && !pool.data_is_empty() {
        Ok(pool.key())
    } else {
        Ok(Pubkey::default())
    }
}

// -----------------------------------
// ACCOUNTS STRUCTS
// -----------------------------------

#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    #[account(
        init,
        payer = authority,
        seeds = [FACTORY_SEED, reward_mint.key().as_ref()],
        bump,
        space = 8 + StakingPoolFactory::INIT_SPACE
    )]
    pub factory: Account<'info, StakingPoolFactory>,

    /// The escrowed reward token every pool of this factory pays out.
    pub reward_mint: Account<'info, Mint>,

    #[account(address = NATIVE_MINT @ StakingError::InvalidNativeMint)]
    pub native_mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetFunder<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED, factory.reward_mint.as_ref()],
        bump = factory.bump
    )]
    pub factory: Account<'info, StakingPoolFactory>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct DeployPool<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED, factory.reward_mint.as_ref()],
        bump = factory.bump,
        has_one = authority @ StakingError::Unauthorized,
        has_one = reward_mint
    )]
    pub factory: Box<Account<'info, StakingPoolFactory>>,

    pub stake_mint: Box<Account<'info, Mint>>,

    pub reward_mint: Box<Account<'info, Mint>>,

    /// Re-running for an existing mint reaches the handler, which rejects it
    /// with `DuplicatePool`.
    #[account(
        init_if_needed,
        payer = authority,
        seeds = [POOL_SEED, factory.key().as_ref(), stake_mint.key().as_ref()],
        bump,
        space = 8 + StakingPool::INIT_SPACE
    )]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(
        init_if_needed,
        payer = authority,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = pool
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = authority,
        seeds = [ESCROW_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = pool
    )]
    pub escrow_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct GetStakingPoolAddress<'info> {
    #[account(seeds = [FACTORY_SEED, factory.reward_mint.as_ref()], bump = factory.bump)]
    pub factory: Account<'info, StakingPoolFactory>,

    /// CHECK: Only its key is used. It does not have to be a live mint, and
    /// the zero address stands for the native mint.
    pub stake_mint: UncheckedAccount<'info>,

    /// CHECK: Address is checked against the derived pool address in the
    /// handler; the account may not exist yet.
    pub pool: UncheckedAccount<'info>,
}
