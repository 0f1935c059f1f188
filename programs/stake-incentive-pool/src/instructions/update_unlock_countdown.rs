//! Change the pool-wide unlock countdown.

use log::info;

use crate::capability::AdminCap;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::Pool;

/// Set a new `unlock_countdown_ms`. Applies only to tranches created after
/// this call; existing `DeactivatingTranche`s keep the `unlocked_ms` they
/// were given at unsubscription time.
///
/// Errors: `ZeroUnlockCountdown`.
pub fn update_unlock_countdown_ms(
    _admin_cap: &AdminCap,
    pool: &mut Pool,
    new_unlock_countdown_ms: u64,
) -> Result<PoolEvent, PoolError> {
    if new_unlock_countdown_ms == 0 {
        return Err(PoolError::ZeroUnlockCountdown);
    }
    pool.unlock_countdown_ms = new_unlock_countdown_ms;

    info!("pool {} updated unlock_countdown_ms to {}", pool.id, new_unlock_countdown_ms);
    Ok(PoolEvent::UpdateUnlockCountdownTsMs { pool: pool.id, new_unlock_countdown_ms })
}
