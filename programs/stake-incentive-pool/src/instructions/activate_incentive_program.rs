//! Resume an incentive program's index advancement.

use log::info;

use crate::capability::AdminCap;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::Pool;
use crate::token::TokenType;

/// Inverse of [`deactivate_incentive_program`](super::deactivate_incentive_program).
///
/// Errors: `InvalidProgramIndex`, `TokenTypeMismatch`, `AlreadyActivated` if
/// already active.
pub fn activate_incentive_program(
    _admin_cap: &AdminCap,
    pool: &mut Pool,
    program_idx: usize,
    token_type: &TokenType,
) -> Result<PoolEvent, PoolError> {
    let program = pool.program_mut(program_idx)?;
    if program.token_type != *token_type {
        return Err(PoolError::TokenTypeMismatch);
    }
    if program.active {
        return Err(PoolError::AlreadyActivated);
    }
    program.active = true;
    let program_id = program.id;

    info!("pool {} activated incentive program {}", pool.id, program_id);
    Ok(PoolEvent::ActivateIncentiveProgram { pool: pool.id, program_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::instructions::create_incentive_program::create_incentive_program;
    use crate::instructions::deactivate_incentive_program::deactivate_incentive_program;
    use crate::token::Coin;
    use solana_program::pubkey::Pubkey;

    #[test]
    fn rejects_double_activation() {
        let cap = AdminCap::issue();
        let mut pool = Pool::new(Pubkey::new_unique(), TokenType::new("S"), 60_000);
        create_incentive_program(&cap, &mut pool, Coin::new(TokenType::new("I"), 100), 10, 60_000, &Clock::new(0))
            .unwrap();
        let err = activate_incentive_program(&cap, &mut pool, 0, &TokenType::new("I")).unwrap_err();
        assert_eq!(err, PoolError::AlreadyActivated);

        deactivate_incentive_program(&cap, &mut pool, 0, &TokenType::new("I")).unwrap();
        activate_incentive_program(&cap, &mut pool, 0, &TokenType::new("I")).unwrap();
        assert!(pool.programs[0].active);
    }
}
