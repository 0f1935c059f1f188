//! Begin the unlock countdown on some or all of a user's active shares.

use log::info;
use solana_program::pubkey::Pubkey;

use crate::clock::Clock;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::{DeactivatingTranche, Pool};
use crate::token::TokenType;

/// Move `shares` (or all active shares, if `None`) from active into a new
/// deactivating tranche. The tranche's yield is capped at the per-program
/// index snapshot taken right now (spec.md §4.4/§4.5): it earns only the
/// delta between a ledger's last-seen index and this snapshot, never
/// anything accrued afterward.
///
/// Errors: `TokenTypeMismatch`, `UserShareNotFound`, `ActiveSharesNotEnough`.
pub fn unsubscribe(
    pool: &mut Pool,
    token_type: &TokenType,
    shares: Option<u64>,
    clock: &Clock,
    user: Pubkey,
) -> Result<PoolEvent, PoolError> {
    if *token_type != pool.stake_token_type {
        return Err(PoolError::TokenTypeMismatch);
    }

    pool.allocate_incentive(clock)?;

    let now_ms = clock.now_ms();
    let unlock_countdown_ms = pool.unlock_countdown_ms;
    let snapshot = pool.index_snapshot();

    let (shares, unlocked_ts_ms) = pool.with_ledger_mut(&user, |ledger| {
        let shares = shares.unwrap_or(ledger.active_shares);
        if ledger.active_shares < shares {
            return Err(PoolError::ActiveSharesNotEnough);
        }
        let unlocked_ms = now_ms.checked_add(unlock_countdown_ms).ok_or(PoolError::ArithmeticOverflow)?;
        ledger.active_shares -= shares;
        ledger.deactivating.push(DeactivatingTranche {
            shares,
            unsubscribed_ms: now_ms,
            unlocked_ms,
            snapshot_index_by_program_id: snapshot.clone(),
        });
        Ok((shares, unlocked_ms))
    })?;

    pool.total_active_shares =
        pool.total_active_shares.checked_sub(shares).ok_or(PoolError::ArithmeticOverflow)?;
    info!("pool {} user {} unsubscribed {} shares", pool.id, user, shares);
    Ok(PoolEvent::Unsubscribe {
        pool: pool.id,
        token_type: token_type.clone(),
        user,
        unsubscribed_shares: shares,
        unsubscribe_ts_ms: now_ms,
        unlocked_ts_ms,
    })
}
