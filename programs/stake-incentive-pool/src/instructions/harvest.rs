//! Claim accrued incentive for a given incentive token type.

use log::info;
use solana_program::pubkey::Pubkey;

use crate::clock::Clock;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::math::owed_for_shares;
use crate::state::Pool;
use crate::token::{Coin, TokenType};

/// Pay out everything owed to `user` across every program whose
/// `token_type` matches `incentive_token_type`, for both active shares and
/// still-deactivating tranches (each capped at its own unsubscription-time
/// snapshot, spec.md §4.5). Never touches share balances or tranches
/// themselves; harvest only moves the per-program index cursor forward and
/// pays out the delta.
///
/// A program whose balance can't cover what's owed pays out its remaining
/// balance rather than erroring (spec.md §9: harvest never blocks on an
/// underfunded program). The shortfall is simply not paid; it is not
/// tracked as a debt.
///
/// Errors: `UserShareNotFound`.
pub fn harvest(
    pool: &mut Pool,
    incentive_token_type: &TokenType,
    clock: &Clock,
    user: Pubkey,
) -> Result<(Coin, PoolEvent), PoolError> {
    pool.allocate_incentive(clock)?;

    let Pool { programs, user_shares, .. } = pool;
    let ledger = user_shares.get_mut(&user).ok_or(PoolError::UserShareNotFound)?;
    if ledger.user != user {
        return Err(PoolError::UserMismatch);
    }

    let mut total_paid: u64 = 0;
    for program in programs.iter_mut() {
        if program.token_type != *incentive_token_type {
            continue;
        }

        let old_cursor = ledger.last_index_by_program_id.get(&program.id).copied().unwrap_or(0);

        let mut owed: u64 = 0;
        if ledger.active_shares > 0 {
            let delta = program.price_index.saturating_sub(old_cursor);
            owed = owed
                .checked_add(owed_for_shares(ledger.active_shares, delta)?)
                .ok_or(PoolError::ArithmeticOverflow)?;
        }
        for tranche in ledger.deactivating.iter() {
            let cap = tranche.snapshot_index_by_program_id.get(&program.id).copied().unwrap_or(old_cursor);
            let delta = cap.saturating_sub(old_cursor);
            owed = owed
                .checked_add(owed_for_shares(tranche.shares, delta)?)
                .ok_or(PoolError::ArithmeticOverflow)?;
        }

        ledger.last_index_by_program_id.insert(program.id, program.price_index);

        if owed == 0 {
            continue;
        }
        let paid = owed.min(program.balance);
        program.balance -= paid;
        program.lifetime_distributed =
            program.lifetime_distributed.checked_add(paid).ok_or(PoolError::ArithmeticOverflow)?;
        total_paid = total_paid.checked_add(paid).ok_or(PoolError::ArithmeticOverflow)?;
    }

    info!("pool {} user {} harvested {} of {:?}", pool.id, user, total_paid, incentive_token_type);
    let coin = Coin::new(incentive_token_type.clone(), total_paid);
    Ok((
        coin,
        PoolEvent::Harvest {
            pool: pool.id,
            incentive_token_type: incentive_token_type.clone(),
            user,
            harvest_amount: total_paid,
        },
    ))
}
