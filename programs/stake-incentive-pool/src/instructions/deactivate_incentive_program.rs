//! Freeze an incentive program's index in place.

use log::info;

use crate::capability::AdminCap;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::Pool;
use crate::token::TokenType;

/// Deactivate the program at `program_idx`. Does *not* advance its index
/// first (spec.md §4.2): it simply freezes whatever index it is currently
/// at. Callers who want accrued time allocated before freezing must call an
/// allocating operation first.
///
/// Errors: `InvalidProgramIndex`, `TokenTypeMismatch` if `token_type`
/// doesn't match the program, `AlreadyDeactivated` if already inactive.
pub fn deactivate_incentive_program(
    _admin_cap: &AdminCap,
    pool: &mut Pool,
    program_idx: usize,
    token_type: &TokenType,
) -> Result<PoolEvent, PoolError> {
    let program = pool.program_mut(program_idx)?;
    if program.token_type != *token_type {
        return Err(PoolError::TokenTypeMismatch);
    }
    if !program.active {
        return Err(PoolError::AlreadyDeactivated);
    }
    program.active = false;
    let program_id = program.id;

    info!("pool {} deactivated incentive program {}", pool.id, program_id);
    Ok(PoolEvent::DeactivateIncentiveProgram { pool: pool.id, program_id })
}
