//! Destroy an incentive program and return its remaining balance.

use log::info;

use crate::capability::AdminCap;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::Pool;
use crate::token::{Coin, TokenType};

/// Remove the program at `program_idx`, returning its remaining balance as
/// a `Coin`. Destroys the program record outright.
///
/// Per spec.md §4.2: users' `last_index_by_program_id` entries keyed by
/// this program's id become dangling. Harvest is safe against this because
/// it iterates `pool.programs` (which no longer contains this id), never
/// the ledger's own keys.
///
/// Errors: `InvalidProgramIndex`, `TokenTypeMismatch`.
pub fn remove_incentive_program(
    _admin_cap: &AdminCap,
    pool: &mut Pool,
    program_idx: usize,
    token_type: &TokenType,
) -> Result<(Coin, PoolEvent), PoolError> {
    {
        let program = pool.program(program_idx)?;
        if program.token_type != *token_type {
            return Err(PoolError::TokenTypeMismatch);
        }
    }

    let program = pool.programs.remove(program_idx);
    let coin = Coin::new(program.token_type.clone(), program.balance);

    info!(
        "pool {} removed incentive program {}, returned {} units of {}",
        pool.id, program.id, program.balance, program.token_type.as_str()
    );

    Ok((
        coin,
        PoolEvent::RemoveIncentiveProgram {
            pool: pool.id,
            program_id: program.id,
            returned_amount: program.balance,
        },
    ))
}
