//! Stable, fatal error identifiers for the pool accounting engine.
//!
//! Every operation returns `Result<_, PoolError>`. There is no retry path:
//! an error means the whole operation is a no-op (no state mutated, no
//! event produced, no coin moved).

use solana_program::program_error::ProgramError;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("provided token type does not match the pool's stake token or the program's incentive token")]
    TokenTypeMismatch,

    #[error("no share ledger exists for this user")]
    UserShareNotFound,

    #[error("tranche is still within its unlock countdown")]
    SharesNotYetExpired,

    #[error("ledger's recorded user differs from the caller")]
    UserMismatch,

    #[error("unsubscribe requested more shares than are active")]
    ActiveSharesNotEnough,

    #[error("unstake requested more shares than are deactivating")]
    DeactivatingSharesNotEnough,

    #[error("unlock countdown must be strictly positive")]
    ZeroUnlockCountdown,

    #[error("incentive program is already deactivated")]
    AlreadyDeactivated,

    #[error("incentive program is already active")]
    AlreadyActivated,

    #[error("incentive program requires a non-zero initial balance")]
    ZeroIncentive,

    #[error("incentive program requires a non-zero period amount")]
    ZeroPeriodIncentiveAmount,

    #[error("stake amount must be non-zero")]
    ZeroCoin,

    #[error("128-bit intermediate exceeded narrowing target")]
    ArithmeticOverflow,

    #[error("program index does not refer to an existing incentive program")]
    InvalidProgramIndex,

    #[error("interval_ms must be strictly positive")]
    ZeroIntervalMs,
}

impl From<PoolError> for ProgramError {
    fn from(e: PoolError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
