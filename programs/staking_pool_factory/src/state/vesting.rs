use anchor_lang::prelude::*;
use crate::error::StakingError;

/// Escrowed rewards of one staker in one pool.
///
/// `locked` vests linearly from `vesting_start` to `vesting_end`. Every new
/// credit first moves the already-vested part into `unlocked`, then re-vests
/// the remainder together with the credit over a full `vesting_duration`.
#[account]
#[derive(Default, InitSpace)]
pub struct VestingEscrow {
    pub pool: Pubkey,
    pub beneficiary: Pubkey,
    pub vesting_duration: i64,
    pub locked: u64,
    pub unlocked: u64,
    pub vesting_start: i64,
    pub vesting_end: i64,
    pub total_credited: u64,
    pub total_released: u64,
    pub bump: u8,
}

impl VestingEscrow {
    pub fn is_initialized(&self) -> bool {
        self.beneficiary != Pubkey::default()
    }

    pub fn open(&mut self, pool: Pubkey, beneficiary: Pubkey, vesting_duration: i64, bump: u8) {
        self.pool = pool;
        self.beneficiary = beneficiary;
        self.vesting_duration = vesting_duration;
        self.bump = bump;
    }

    /// Part of `locked` that has vested by `now`.
    fn vested_locked(&self, now: i64) -> Result<u64> {
        if now >= self.vesting_end {
            return Ok(self.locked);
        }
        if now <= self.vesting_start {
            return Ok(0);
        }
        let elapsed = (now - self.vesting_start) as u128;
        let span = (self.vesting_end - self.vesting_start) as u128;
        let vested = u128::from(self.locked)
            .checked_mul(elapsed)
            .ok_or(StakingError::MathOverflow)?
            / span;
        u64::try_from(vested).map_err(|_| error!(StakingError::MathOverflow))
    }

    /// Amount `release` would pay out at `now`.
    pub fn releasable(&self, now: i64) -> Result<u64> {
        self.unlocked
            .checked_add(self.vested_locked(now)?)
            .ok_or_else(|| error!(StakingError::MathOverflow))
    }

    fn roll(&mut self, now: i64) -> Result<()> {
        let vested = self.vested_locked(now)?;
        self.unlocked = self
            .unlocked
            .checked_add(vested)
            .ok_or(StakingError::MathOverflow)?;
        self.locked -= vested;
        // What is still locked vests over the rest of the original window.
        self.vesting_start = self.vesting_start.max(now.min(self.vesting_end));
        Ok(())
    }

    pub fn credit(&mut self, amount: u64, now: i64) -> Result<()> {
        let vested = self.vested_locked(now)?;
        let unlocked = self
            .unlocked
            .checked_add(vested)
            .ok_or(StakingError::MathOverflow)?;
        let locked = (self.locked - vested)
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        let end = now
            .checked_add(self.vesting_duration)
            .ok_or(StakingError::MathOverflow)?;
        let total_credited = self
            .total_credited
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.unlocked = unlocked;
        self.locked = locked;
        self.vesting_start = now;
        self.vesting_end = end;
        self.total_credited = total_credited;

        if self.vesting_duration == 0 {
            self.roll(now)?;
        }
        Ok(())
    }

    /// Takes everything vested by `now`.
    pub fn release(&mut self, now: i64) -> Result<u64> {
        let amount = self.releasable(now)?;
        require!(amount > 0, StakingError::NothingToRelease);
        self.roll(now)?;
        self.unlocked = 0;
        self.total_released = self
            .total_released
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;
    use crate::test_utils::assert_error;

    const YEAR: i64 = 365 * SECONDS_PER_DAY;

    fn escrow(duration: i64) -> VestingEscrow {
        let mut e = VestingEscrow::default();
        e.open(Pubkey::new_unique(), Pubkey::new_unique(), duration, 254);
        e
    }

    #[test]
    fn vests_linearly() {
        let mut e = escrow(YEAR);
        e.credit(1_000, 0).unwrap();
        assert_eq!(e.releasable(0).unwrap(), 0);
        assert_eq!(e.releasable(YEAR / 4).unwrap(), 250);
        assert_eq!(e.releasable(YEAR).unwrap(), 1_000);
        assert_eq!(e.releasable(10 * YEAR).unwrap(), 1_000);
    }

    #[test]
    fn new_credit_keeps_vested_part() {
        let mut e = escrow(100);
        e.credit(100, 0).unwrap();
        // Half vested, then 100 more arrives: 50 stays unlocked, 150 re-vests.
        e.credit(100, 50).unwrap();
        assert_eq!(e.unlocked, 50);
        assert_eq!(e.locked, 150);
        assert_eq!(e.releasable(50).unwrap(), 50);
        assert_eq!(e.releasable(150).unwrap(), 200);
    }

    #[test]
    fn release_pays_once() {
        let mut e = escrow(100);
        e.credit(100, 0).unwrap();
        assert_eq!(e.release(40).unwrap(), 40);
        assert_error(e.release(40), StakingError::NothingToRelease);
        assert_eq!(e.release(100).unwrap(), 60);
        assert_eq!(e.total_released, e.total_credited);
    }

    #[test]
    fn zero_duration_is_immediately_releasable() {
        let mut e = escrow(0);
        e.credit(77, 10).unwrap();
        assert_eq!(e.locked, 0);
        assert_eq!(e.release(10).unwrap(), 77);
    }
}
