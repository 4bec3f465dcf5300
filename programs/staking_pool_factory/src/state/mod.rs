pub mod factory;
pub mod pool;
pub mod staker;
pub mod vesting;

pub use factory::*;
pub use pool::*;
pub use staker::*;
pub use vesting::*;
