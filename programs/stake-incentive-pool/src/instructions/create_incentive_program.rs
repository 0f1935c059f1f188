//! Create a new incentive program on an existing pool.

use log::info;

use crate::capability::AdminCap;
use crate::clock::Clock;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::{IncentiveProgram, Pool};
use crate::token::{Coin, TokenType};

/// Create a fresh incentive program funded by `incentive_coin`.
///
/// Per spec.md §4.2: `last_allocate_ms` is set to `now` *unrounded*, not to
/// the previous interval boundary — this is what prevents the new program
/// from retroactively allocating to stakers who were already active before
/// it existed.
///
/// Errors: `ZeroIncentive` if the coin is empty, `ZeroPeriodIncentiveAmount`
/// if `period_amount == 0`, `ZeroIntervalMs` if `interval_ms == 0`.
pub fn create_incentive_program(
    _admin_cap: &AdminCap,
    pool: &mut Pool,
    incentive_coin: Coin,
    period_amount: u64,
    interval_ms: u64,
    clock: &Clock,
) -> Result<PoolEvent, PoolError> {
    if incentive_coin.amount() == 0 {
        return Err(PoolError::ZeroIncentive);
    }
    if period_amount == 0 {
        return Err(PoolError::ZeroPeriodIncentiveAmount);
    }
    if interval_ms == 0 {
        return Err(PoolError::ZeroIntervalMs);
    }

    pool.allocate_incentive(clock)?;

    let id = pool.next_incentive_id;
    pool.next_incentive_id = pool
        .next_incentive_id
        .checked_add(1)
        .ok_or(PoolError::ArithmeticOverflow)?;

    let now_ms = clock.now_ms();
    let token_type = incentive_coin.token_type().clone();
    let initial_balance = incentive_coin.into_amount();

    pool.programs.push(IncentiveProgram {
        id,
        token_type: token_type.clone(),
        period_amount,
        interval_ms,
        active: true,
        last_allocate_ms: now_ms,
        price_index: 0,
        balance: initial_balance,
        created_ms: now_ms,
        lifetime_deposited: initial_balance,
        lifetime_distributed: 0,
    });

    info!(
        "pool {} created incentive program {} ({} units of {}, period {} / {} ms)",
        pool.id, id, initial_balance, token_type.as_str(), period_amount, interval_ms
    );

    Ok(PoolEvent::CreateIncentiveProgram {
        pool: pool.id,
        program_id: id,
        token_type,
        period_amount,
        interval_ms,
        initial_balance,
    })
}
