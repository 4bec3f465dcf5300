use anchor_lang::prelude::*;

#[event]
pub struct FactoryInitialized {
    pub factory: Pubkey,
    pub authority: Pubkey,
    pub funder: Pubkey,
    pub reward_mint: Pubkey,
    pub native_mint: Pubkey,
    pub vesting_duration: i64,
}

#[event]
pub struct FunderUpdated {
    pub factory: Pubkey,
    pub old_funder: Pubkey,
    pub new_funder: Pubkey,
}

#[event]
pub struct PoolDeployed {
    pub stake_mint: Pubkey,
    pub pool: Pubkey,
    pub start_time: i64,
    pub round_duration: i64,
    pub native: bool,
}

#[event]
pub struct Staked {
    pub pool: Pubkey,
    pub account: Pubkey,
    pub amount: u64,
}

#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub account: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardPaid {
    pub pool: Pubkey,
    pub account: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardFunded {
    pub pool: Pubkey,
    pub amount: u64,
    pub duration: i64,
    pub reward_rate: u64,
    pub period_end: i64,
    pub round: Option<u64>,
}

#[event]
pub struct VestingReleased {
    pub pool: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
}
