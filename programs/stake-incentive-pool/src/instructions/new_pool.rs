//! Create a new pool.

use log::info;
use solana_program::pubkey::Pubkey;

use crate::capability::AdminCap;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::Pool;
use crate::token::TokenType;

/// Create a new pool for `stake_token_type`, locked by `unlock_countdown_ms`.
///
/// Inputs: a freshly-issued `AdminCap`, a caller-assigned `pool_id`
/// (spec.md §9 "Dynamic type-keyed storage" / §1: object identity is an
/// external-storage concern), the unlock countdown, and the stake token
/// type.
///
/// Returns: the new `Pool` and a `NewPool` event.
///
/// Errors: `ZeroUnlockCountdown` if `unlock_countdown_ms == 0`.
pub fn new_pool(
    _admin_cap: &AdminCap,
    pool_id: Pubkey,
    unlock_countdown_ms: u64,
    stake_token_type: TokenType,
) -> Result<(Pool, PoolEvent), PoolError> {
    if unlock_countdown_ms == 0 {
        return Err(PoolError::ZeroUnlockCountdown);
    }

    let pool = Pool::new(pool_id, stake_token_type.clone(), unlock_countdown_ms);
    let event = PoolEvent::NewPool {
        pool: pool_id,
        stake_token_type,
        unlock_countdown_ms,
    };
    info!("pool {} created, unlock_countdown_ms={}", pool_id, unlock_countdown_ms);
    Ok((pool, event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_unlock_countdown() {
        let cap = AdminCap::issue();
        let err = new_pool(&cap, Pubkey::new_unique(), 0, TokenType::new("S")).unwrap_err();
        assert_eq!(err, PoolError::ZeroUnlockCountdown);
    }

    #[test]
    fn creates_an_empty_pool() {
        let cap = AdminCap::issue();
        let id = Pubkey::new_unique();
        let (pool, event) = new_pool(&cap, id, 60_000, TokenType::new("S")).unwrap();
        assert_eq!(pool.id, id);
        assert_eq!(pool.unlock_countdown_ms, 60_000);
        assert!(matches!(event, PoolEvent::NewPool { pool, .. } if pool == id));
    }
}
