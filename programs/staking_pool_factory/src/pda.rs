use anchor_lang::prelude::*;
use crate::constants::*;

pub fn factory_pda(reward_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[FACTORY_SEED, reward_mint.as_ref()], &crate::ID)
}

pub fn pool_pda(factory: &Pubkey, stake_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POOL_SEED, factory.as_ref(), stake_mint.as_ref()],
        &crate::ID,
    )
}

pub fn staker_pda(pool: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKER_SEED, pool.as_ref(), owner.as_ref()], &crate::ID)
}

pub fn vesting_pda(pool: &Pubkey, beneficiary: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VESTING_SEED, pool.as_ref(), beneficiary.as_ref()],
        &crate::ID,
    )
}

pub fn stake_vault_pda(pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKE_VAULT_SEED, pool.as_ref()], &crate::ID)
}

pub fn reward_vault_pda(pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_VAULT_SEED, pool.as_ref()], &crate::ID)
}

pub fn escrow_vault_pda(pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ESCROW_VAULT_SEED, pool.as_ref()], &crate::ID)
}

pub fn unwrap_pda(pool: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[UNWRAP_SEED, pool.as_ref(), owner.as_ref()], &crate::ID)
}

/// Mint a pool is registered under. The zero address names the native pool.
pub fn registry_mint(stake_mint: &Pubkey) -> Pubkey {
    if *stake_mint == Pubkey::default() {
        NATIVE_MINT
    } else {
        *stake_mint
    }
}

/// Address of the pool for `stake_mint`, whether or not it has been
/// deployed yet. `deploy_pool` creates exactly this account.
pub fn get_staking_pool_address(factory: &Pubkey, stake_mint: &Pubkey) -> Pubkey {
    pool_pda(factory, &registry_mint(stake_mint)).0
}
