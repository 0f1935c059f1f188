//! Change an incentive program's period amount and/or interval.

use log::info;

use crate::capability::AdminCap;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::Pool;

/// Update `period_amount` and/or `interval_ms` on the program at
/// `program_idx`. Both fields are optional; omitted fields are left
/// unchanged.
///
/// This does **not** call `allocate_incentive` first (spec.md §9, open
/// question: "Config updates do not pre-allocate"). The new rate therefore
/// retroactively applies to the unallocated window since
/// `last_allocate_ms` the next time *any* operation allocates this
/// program. This is flagged, not silently "fixed" — callers who want the
/// old rate applied to already-elapsed time must allocate before calling
/// this.
///
/// Errors: `InvalidProgramIndex`, `ZeroPeriodIncentiveAmount`,
/// `ZeroIntervalMs`.
pub fn update_incentive_config(
    _admin_cap: &AdminCap,
    pool: &mut Pool,
    program_idx: usize,
    new_period_amount: Option<u64>,
    new_interval_ms: Option<u64>,
) -> Result<PoolEvent, PoolError> {
    if new_period_amount == Some(0) {
        return Err(PoolError::ZeroPeriodIncentiveAmount);
    }
    if new_interval_ms == Some(0) {
        return Err(PoolError::ZeroIntervalMs);
    }

    let program = pool.program_mut(program_idx)?;
    if let Some(period_amount) = new_period_amount {
        program.period_amount = period_amount;
    }
    if let Some(interval_ms) = new_interval_ms {
        program.interval_ms = interval_ms;
    }
    let program_id = program.id;

    info!(
        "pool {} updated incentive program {} config (period_amount={:?}, interval_ms={:?})",
        pool.id, program_id, new_period_amount, new_interval_ms
    );
    Ok(PoolEvent::UpdateIncentiveConfig {
        pool: pool.id,
        program_id,
        new_period_amount,
        new_interval_ms,
    })
}
