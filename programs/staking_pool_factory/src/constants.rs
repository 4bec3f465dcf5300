use anchor_lang::prelude::Pubkey;
use anchor_spl::token::spl_token;

// PDA seeds
pub const FACTORY_SEED: &[u8] = b"factory";
pub const POOL_SEED: &[u8] = b"pool";
pub const STAKER_SEED: &[u8] = b"staker";
pub const VESTING_SEED: &[u8] = b"vesting";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const ESCROW_VAULT_SEED: &[u8] = b"escrow_vault";
pub const UNWRAP_SEED: &[u8] = b"unwrap";

/// Wrapped SOL. The native pool stakes it; lookups also accept the zero
/// address for it.
pub const NATIVE_MINT: Pubkey = spl_token::native_mint::ID;

pub const SECONDS_PER_DAY: i64 = 86_400; // 24 hours

/// Fixed-point scale of `reward_per_token_stored`.
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 1e18

// Vesting
pub const DEFAULT_VESTING_DURATION: i64 = 365 * SECONDS_PER_DAY; // 1 year
pub const MAX_VESTING_DURATION: i64 = 4 * 365 * SECONDS_PER_DAY; // 4 years

// Rounds
pub const MAX_ROUND_DURATION_DAYS: u64 = 365;
