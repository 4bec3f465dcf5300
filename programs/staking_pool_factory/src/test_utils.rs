use anchor_lang::prelude::*;
use crate::error::StakingError;

/// Fails the test unless `result` is the given program error.
pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: StakingError) {
    match result {
        Err(Error::AnchorError(err)) => {
            assert_eq!(err.error_code_number, u32::from(expected), "{}", err.error_msg)
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
