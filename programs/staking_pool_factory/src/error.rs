use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    #[msg("A pool already exists for this stake mint.")]
    DuplicatePool,
    #[msg("The pool has not started yet.")]
    NotStarted,
    #[msg("Amount must be greater than zero.")]
    ZeroAmount,
    #[msg("Withdraw amount exceeds staked balance.")]
    InsufficientBalance,
    #[msg("Reward rate rounds down to zero.")]
    RewardTooSmall,
    #[msg("Funder does not hold enough reward tokens.")]
    InsufficientRewardBalance,
    #[msg("Reentrancy attempt detected.")]
    ReentrancyGuard,
    #[msg("Unauthorized action.")]
    Unauthorized,
    #[msg("Round duration must be between 1 and 365 days.")]
    InvalidRoundDuration,
    #[msg("Start time must not be negative.")]
    InvalidStartTime,
    #[msg("Reward duration must be greater than zero.")]
    InvalidDuration,
    #[msg("Vesting duration is out of range.")]
    InvalidVestingDuration,
    #[msg("Nothing has vested yet.")]
    NothingToRelease,
    #[msg("Native mint must be wrapped SOL.")]
    InvalidNativeMint,
    #[msg("This pool does not stake native SOL.")]
    NotNativePool,
    #[msg("Pool account does not match the stake mint.")]
    PoolAddressMismatch,
    #[msg("Arithmetic overflow.")]
    MathOverflow,
}
