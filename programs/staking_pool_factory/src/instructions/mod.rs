pub mod factory;
pub mod native;
pub mod rewards;
pub mod staking;
pub mod vesting;
pub mod views;

pub use factory::*;
pub use native::*;
pub use rewards::*;
pub use staking::*;
pub use vesting::*;
pub use views::*;
