use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, CloseAccount, SyncNative, Token, TokenAccount, Transfer};
use crate::constants::POOL_SEED;
use crate::state::StakingPool;

/// Runs `op` with the pool's reentrancy guard held.
///
/// The flag is written to account data before `op` runs, so a nested
/// invocation reading the pool sees it set. It is cleared on every return
/// path; a failed `op` also aborts the transaction.
pub fn with_reentrancy_guard<'info, T>(
    pool: &mut Account<'info, StakingPool>,
    op: impl FnOnce(&mut Account<'info, StakingPool>) -> Result<T>,
) -> Result<T> {
    pool.enter()?;
    pool.exit(&crate::ID)?;
    let result = op(pool);
    pool.leave();
    result
}

/// Moves tokens out of a wallet-owned account; `authority` signs.
pub fn transfer_from_user<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    let cpi_ctx = CpiContext::new(
        token_program.to_account_info(),
        Transfer {
            from: from.to_account_info(),
            to: to.to_account_info(),
            authority: authority.to_account_info(),
        },
    );
    token::transfer(cpi_ctx, amount)
}

/// Moves tokens out of one of the pool's vaults; the pool PDA signs.
pub fn transfer_from_pool<'info>(
    token_program: &Program<'info, Token>,
    pool: &Account<'info, StakingPool>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    amount: u64,
) -> Result<()> {
    let factory = pool.factory;
    let stake_mint = pool.stake_mint;
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[POOL_SEED, factory.as_ref(), stake_mint.as_ref(), &bump];
    let signer = &[seeds];

    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        Transfer {
            from: from.to_account_info(),
            to: to.to_account_info(),
            authority: pool.to_account_info(),
        },
        signer,
    );
    token::transfer(cpi_ctx, amount)
}

/// Sends lamports into a wrapped-SOL account and syncs its token balance.
pub fn wrap_lamports<'info>(
    system_program: &Program<'info, System>,
    token_program: &Program<'info, Token>,
    from: &Signer<'info>,
    to: &Account<'info, TokenAccount>,
    lamports: u64,
) -> Result<()> {
    system_program::transfer(
        CpiContext::new(
            system_program.to_account_info(),
            system_program::Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
            },
        ),
        lamports,
    )?;
    token::sync_native(CpiContext::new(
        token_program.to_account_info(),
        SyncNative {
            account: to.to_account_info(),
        },
    ))
}

/// Moves `amount` wrapped SOL from a pool vault into the pool-owned
/// `scratch` account and closes it, so `destination` receives the amount as
/// lamports together with the scratch account's rent.
pub fn unwrap_from_pool<'info>(
    token_program: &Program<'info, Token>,
    pool: &Account<'info, StakingPool>,
    vault: &Account<'info, TokenAccount>,
    scratch: &Account<'info, TokenAccount>,
    destination: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    transfer_from_pool(token_program, pool, vault, scratch, amount)?;

    let factory = pool.factory;
    let stake_mint = pool.stake_mint;
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[POOL_SEED, factory.as_ref(), stake_mint.as_ref(), &bump];
    let signer = &[seeds];
    token::close_account(CpiContext::new_with_signer(
        token_program.to_account_info(),
        CloseAccount {
            account: scratch.to_account_info(),
            destination: destination.clone(),
            authority: pool.to_account_info(),
        },
        signer,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StakingError;
    use crate::test_utils::assert_error;

    fn stored_guard(pool: &Account<'_, StakingPool>) -> bool {
        let info = pool.to_account_info();
        let data = info.try_borrow_data().unwrap();
        StakingPool::try_deserialize(&mut &data[..])
            .unwrap()
            .reentrancy_guard
    }

    #[test]
    fn guard_is_persisted_and_released() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; 8 + StakingPool::INIT_SPACE];
        StakingPool::default()
            .try_serialize(&mut data.as_mut_slice())
            .unwrap();
        let info = AccountInfo::new(
            &key,
            false,
            true,
            &mut lamports,
            &mut data,
            &owner,
            false,
            0,
        );
        let mut pool = Account::<StakingPool>::try_from(&info).unwrap();

        let result = with_reentrancy_guard(&mut pool, |pool| -> Result<()> {
            assert!(pool.reentrancy_guard);
            assert!(stored_guard(pool));
            // A nested call sees the flag and is turned away.
            assert_error(
                with_reentrancy_guard(pool, |_| Ok(())),
                StakingError::ReentrancyGuard,
            );
            err!(StakingError::InsufficientBalance)
        });
        assert_error(result, StakingError::InsufficientBalance);
        assert!(!pool.reentrancy_guard);

        let value = with_reentrancy_guard(&mut pool, |pool| Ok(pool.total_staked + 7)).unwrap();
        assert_eq!(value, 7);
        assert!(!pool.reentrancy_guard);
    }
}
