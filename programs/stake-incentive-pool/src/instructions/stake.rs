//! Stake principal into the pool.

use log::info;
use solana_program::pubkey::Pubkey;

use crate::clock::Clock;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::Pool;
use crate::token::Coin;

/// Deposit `stake_coin` and receive shares 1:1 with its amount.
///
/// Per spec.md §4.4 / §9: this call **overwrites**
/// `last_index_by_program_id` with the pool's current per-program index
/// snapshot, even for a user who already had active shares. Any
/// unharvested yield on those pre-existing active shares is silently
/// consumed by this call if the caller didn't harvest first. This is a
/// known, intentional (if surprising) behavior carried over unchanged from
/// the source — not something this crate "fixes".
///
/// Errors: `TokenTypeMismatch`, `ZeroCoin`.
pub fn stake(
    pool: &mut Pool,
    stake_coin: Coin,
    clock: &Clock,
    user: Pubkey,
) -> Result<PoolEvent, PoolError> {
    if *stake_coin.token_type() != pool.stake_token_type {
        return Err(PoolError::TokenTypeMismatch);
    }
    let amount = stake_coin.amount();
    if amount == 0 {
        return Err(PoolError::ZeroCoin);
    }

    pool.allocate_incentive(clock)?;

    let now_ms = clock.now_ms();
    let snapshot = pool.index_snapshot();
    pool.stake_balance = pool.stake_balance.checked_add(amount).ok_or(PoolError::ArithmeticOverflow)?;

    let ledger = pool.ledger_entry(user);
    ledger.last_stake_ms = now_ms;
    ledger.total_shares = ledger.total_shares.checked_add(amount).ok_or(PoolError::ArithmeticOverflow)?;
    ledger.active_shares = ledger.active_shares.checked_add(amount).ok_or(PoolError::ArithmeticOverflow)?;
    ledger.last_index_by_program_id = snapshot.clone();
    let total_shares_after = ledger.total_shares;

    pool.total_active_shares =
        pool.total_active_shares.checked_add(amount).ok_or(PoolError::ArithmeticOverflow)?;

    info!("pool {} user {} staked {}", pool.id, user, amount);
    Ok(PoolEvent::Stake {
        pool: pool.id,
        token_type: pool.stake_token_type.clone(),
        user,
        stake_amount: total_shares_after,
        stake_ts_ms: now_ms,
        last_index_snapshot: snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::create_incentive_program::create_incentive_program;
    use crate::instructions::harvest::harvest;
    use crate::capability::AdminCap;
    use crate::token::TokenType;

    fn fresh_pool() -> Pool {
        Pool::new(Pubkey::new_unique(), TokenType::new("S"), 60_000)
    }

    #[test]
    fn rejects_wrong_token_type() {
        let mut pool = fresh_pool();
        let err = stake(&mut pool, Coin::new(TokenType::new("OTHER"), 1), &Clock::new(0), Pubkey::new_unique())
            .unwrap_err();
        assert_eq!(err, PoolError::TokenTypeMismatch);
    }

    #[test]
    fn rejects_zero_amount() {
        let mut pool = fresh_pool();
        let err = stake(&mut pool, Coin::zero(TokenType::new("S")), &Clock::new(0), Pubkey::new_unique())
            .unwrap_err();
        assert_eq!(err, PoolError::ZeroCoin);
    }

    #[test]
    fn credits_shares_and_pool_balance() {
        let mut pool = fresh_pool();
        let user = Pubkey::new_unique();
        stake(&mut pool, Coin::new(TokenType::new("S"), 1_000_000_000), &Clock::new(1_715_212_800_000), user)
            .unwrap();
        assert_eq!(pool.stake_balance, 1_000_000_000);
        assert_eq!(pool.total_active_shares, 1_000_000_000);
        let ledger = pool.ledger(&user).unwrap();
        assert_eq!(ledger.active_shares, 1_000_000_000);
        assert_eq!(ledger.total_shares, 1_000_000_000);
        assert_eq!(ledger.last_stake_ms, 1_715_212_800_000);
    }

    #[test]
    fn restaking_overwrites_the_index_snapshot_and_forfeits_unharvested_yield() {
        let cap = AdminCap::issue();
        let mut pool = fresh_pool();
        create_incentive_program(
            &cap,
            &mut pool,
            Coin::new(TokenType::new("I"), 100_000_000_000),
            10_000_000,
            60_000,
            &Clock::new(0),
        )
        .unwrap();
        let user = Pubkey::new_unique();
        stake(&mut pool, Coin::new(TokenType::new("S"), 1_000_000_000), &Clock::new(0), user).unwrap();

        // One full period elapses; the user has accrued yield but hasn't harvested.
        stake(&mut pool, Coin::new(TokenType::new("S"), 1), &Clock::new(60_000), user).unwrap();

        // The pending yield from the first period is gone: harvesting now
        // (still at the same clock value) returns zero.
        let (coin, _) = harvest(&mut pool, &TokenType::new("I"), &Clock::new(60_000), user).unwrap();
        assert_eq!(coin.amount(), 0);
    }
}
