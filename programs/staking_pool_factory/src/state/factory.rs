use anchor_lang::prelude::*;
use crate::constants::MAX_VESTING_DURATION;
use crate::error::StakingError;
use crate::state::StakingPool;

/// Deploys and registers staking pools for one reward mint.
///
/// The registry itself is the set of pool PDAs `["pool", factory, stake_mint]`:
/// one address per mint, created once and never closed.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct StakingPoolFactory {
    pub authority: Pubkey,     // Deploys pools, rotates the funder
    pub funder: Pubkey,        // Only key allowed to notify rewards
    pub reward_mint: Pubkey,   // Escrowed reward token paid by every pool
    pub native_mint: Pubkey,   // Wrapped SOL; its pool accepts lamports
    pub vesting_duration: i64, // Seconds over which claimed rewards vest
    pub pool_count: u64,       // Pools deployed so far
    pub bump: u8,
}

impl StakingPoolFactory {
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        funder: Pubkey,
        reward_mint: Pubkey,
        native_mint: Pubkey,
        vesting_duration: i64,
        bump: u8,
    ) -> Result<()> {
        require!(
            (0..=MAX_VESTING_DURATION).contains(&vesting_duration),
            StakingError::InvalidVestingDuration
        );
        self.authority = authority;
        self.funder = funder;
        self.reward_mint = reward_mint;
        self.native_mint = native_mint;
        self.vesting_duration = vesting_duration;
        self.pool_count = 0;
        self.bump = bump;
        Ok(())
    }

    /// Returns the previous funder.
    pub fn set_funder(&mut self, caller: &Pubkey, new_funder: Pubkey) -> Result<Pubkey> {
        require_keys_eq!(self.authority, *caller, StakingError::Unauthorized);
        Ok(std::mem::replace(&mut self.funder, new_funder))
    }

    /// Registers `pool` for `stake_mint`. Fails with `DuplicatePool` when the
    /// record at the mint's address has already been initialized. A pool for
    /// `native_mint` is marked native.
    pub fn deploy_pool(
        &mut self,
        factory: Pubkey,
        pool: &mut StakingPool,
        stake_mint: Pubkey,
        start_time: i64,
        round_duration_days: u64,
        bump: u8,
    ) -> Result<()> {
        let pool_count = self
            .pool_count
            .checked_add(1)
            .ok_or(StakingError::MathOverflow)?;
        pool.initialize(factory, stake_mint, start_time, round_duration_days, bump)?;
        pool.is_native = stake_mint == self.native_mint;
        self.pool_count = pool_count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;
    use crate::constants::NATIVE_MINT;
    use crate::pda::{get_staking_pool_address, pool_pda};
    use crate::test_utils::assert_error;
    use std::collections::BTreeMap;

    const START: i64 = 1_680_340_100;

    /// Pool accounts by address, standing in for chain storage.
    struct Registry {
        key: Pubkey,
        factory: StakingPoolFactory,
        accounts: BTreeMap<Pubkey, StakingPool>,
    }

    impl Registry {
        fn new() -> Self {
            let mut factory = StakingPoolFactory::default();
            factory
                .initialize(
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                    NATIVE_MINT,
                    365 * SECONDS_PER_DAY,
                    254,
                )
                .unwrap();
            Registry {
                key: Pubkey::new_unique(),
                factory,
                accounts: BTreeMap::new(),
            }
        }

        fn deploy(&mut self, stake_mint: Pubkey, round_duration_days: u64) -> Result<Pubkey> {
            let (address, bump) = pool_pda(&self.key, &stake_mint);
            let mut pool = self.accounts.get(&address).cloned().unwrap_or_default();
            self.factory.deploy_pool(
                self.key,
                &mut pool,
                stake_mint,
                START,
                round_duration_days,
                bump,
            )?;
            self.accounts.insert(address, pool);
            Ok(address)
        }

        fn lookup(&self, stake_mint: &Pubkey) -> Pubkey {
            let address = get_staking_pool_address(&self.key, stake_mint);
            match self.accounts.get(&address) {
                Some(pool) if pool.is_registered() => address,
                _ => Pubkey::default(),
            }
        }
    }

    #[test]
    fn deploy_registers_pool() {
        let mut registry = Registry::new();
        let mint = Pubkey::new_unique();
        assert_eq!(registry.lookup(&mint), Pubkey::default());

        let address = registry.deploy(mint, 7).unwrap();
        assert_eq!(registry.lookup(&mint), address);
        assert_eq!(registry.factory.pool_count, 1);

        let pool = &registry.accounts[&address];
        assert_eq!(pool.factory, registry.key);
        assert_eq!(pool.stake_mint, mint);
        assert_eq!(pool.start_time, START);
        assert_eq!(pool.round_duration, 7 * SECONDS_PER_DAY);
        assert_eq!(pool.last_update_time, START);
    }

    #[test]
    fn second_deploy_for_same_mint_fails() {
        let mut registry = Registry::new();
        let mint = Pubkey::new_unique();
        let address = registry.deploy(mint, 7).unwrap();
        let pool_before = registry.accounts[&address].clone();

        assert_error(registry.deploy(mint, 14), StakingError::DuplicatePool);
        assert_eq!(registry.lookup(&mint), address);
        assert_eq!(registry.accounts[&address], pool_before);
        assert_eq!(registry.factory.pool_count, 1);
    }

    #[test]
    fn address_is_known_before_deploy() {
        let mut registry = Registry::new();
        let mint = Pubkey::new_unique();
        let precomputed = get_staking_pool_address(&registry.key, &mint);
        assert_eq!(registry.deploy(mint, 7).unwrap(), precomputed);
    }

    #[test]
    fn distinct_mints_get_distinct_pools() {
        let mut registry = Registry::new();
        let eth = registry.deploy(Pubkey::new_unique(), 7).unwrap();
        let steth = registry.deploy(Pubkey::new_unique(), 7).unwrap();
        assert_ne!(eth, steth);
        assert_eq!(registry.factory.pool_count, 2);
    }

    #[test]
    fn failed_deploy_does_not_count() {
        let mut registry = Registry::new();
        let mint = Pubkey::new_unique();
        assert_error(registry.deploy(mint, 0), StakingError::InvalidRoundDuration);
        assert_eq!(registry.factory.pool_count, 0);
        assert_eq!(registry.lookup(&mint), Pubkey::default());
    }

    #[test]
    fn only_authority_sets_funder() {
        let mut registry = Registry::new();
        let authority = registry.factory.authority;
        let old = registry.factory.funder;
        let new_funder = Pubkey::new_unique();

        assert_error(
            registry.factory.set_funder(&Pubkey::new_unique(), new_funder),
            StakingError::Unauthorized,
        );
        assert_eq!(registry.factory.set_funder(&authority, new_funder).unwrap(), old);
        assert_eq!(registry.factory.funder, new_funder);
    }

    #[test]
    fn vesting_duration_is_bounded() {
        let mut factory = StakingPoolFactory::default();
        let key = Pubkey::new_unique();
        assert_error(
            factory.initialize(key, key, key, NATIVE_MINT, -1, 1),
            StakingError::InvalidVestingDuration,
        );
        assert_error(
            factory.initialize(key, key, key, NATIVE_MINT, MAX_VESTING_DURATION + 1, 1),
            StakingError::InvalidVestingDuration,
        );
        factory.initialize(key, key, key, NATIVE_MINT, 0, 1).unwrap();
    }

    #[test]
    fn native_pool_is_found_by_zero_address() {
        let mut registry = Registry::new();
        assert_eq!(registry.lookup(&Pubkey::default()), Pubkey::default());

        let native = registry.deploy(NATIVE_MINT, 7).unwrap();
        let steth = registry.deploy(Pubkey::new_unique(), 7).unwrap();
        assert!(registry.accounts[&native].is_native);
        assert!(!registry.accounts[&steth].is_native);
        assert_eq!(registry.lookup(&Pubkey::default()), native);
        assert_eq!(registry.lookup(&NATIVE_MINT), native);

        assert_error(registry.deploy(NATIVE_MINT, 7), StakingError::DuplicatePool);
        assert_eq!(registry.factory.pool_count, 2);
    }
}
