//! Withdraw shares whose unlock countdown has fully elapsed.

use log::info;
use solana_program::pubkey::Pubkey;

use crate::clock::Clock;
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::state::Pool;
use crate::token::{Coin, TokenType};

/// Withdraw `shares` (or all unlocked deactivating shares, if `None`) back
/// into a `Coin`. Tranches are consumed FIFO (oldest unsubscription first);
/// consuming only part of a tranche splits it, leaving the remainder with
/// its original `unlocked_ms`/snapshot intact.
///
/// A tranche still inside its countdown blocks consumption past it:
/// `SharesNotYetExpired`. Requesting more than is deactivating (after
/// expiry checks) is `DeactivatingSharesNotEnough`. Requesting zero, or
/// defaulting against an empty deactivating set, is a no-op that still
/// returns a (zero-value) coin and event.
///
/// Errors: `TokenTypeMismatch`, `UserShareNotFound`, `SharesNotYetExpired`,
/// `DeactivatingSharesNotEnough`.
pub fn unstake(
    pool: &mut Pool,
    token_type: &TokenType,
    shares: Option<u64>,
    clock: &Clock,
    user: Pubkey,
) -> Result<(Coin, PoolEvent), PoolError> {
    if *token_type != pool.stake_token_type {
        return Err(PoolError::TokenTypeMismatch);
    }

    pool.allocate_incentive(clock)?;
    let now_ms = clock.now_ms();

    let consumed = pool.with_ledger_mut(&user, |ledger| {
        let target = shares.unwrap_or_else(|| ledger.total_deactivating_shares());
        if target == 0 {
            return Ok(0);
        }

        let mut remaining = target;
        let mut consumed: u64 = 0;
        let mut i = 0;
        while remaining > 0 && i < ledger.deactivating.len() {
            let tranche = &mut ledger.deactivating[i];
            if tranche.unlocked_ms > now_ms {
                return Err(PoolError::SharesNotYetExpired);
            }
            if tranche.shares <= remaining {
                remaining -= tranche.shares;
                consumed = consumed.checked_add(tranche.shares).ok_or(PoolError::ArithmeticOverflow)?;
                ledger.deactivating.remove(i);
            } else {
                tranche.shares -= remaining;
                consumed = consumed.checked_add(remaining).ok_or(PoolError::ArithmeticOverflow)?;
                remaining = 0;
            }
        }
        if remaining > 0 {
            return Err(PoolError::DeactivatingSharesNotEnough);
        }

        ledger.total_shares = ledger.total_shares.checked_sub(consumed).ok_or(PoolError::ArithmeticOverflow)?;
        Ok(consumed)
    })?;

    pool.prune_ledger_if_empty(&user);

    let coin = if consumed > 0 {
        pool.stake_balance = pool.stake_balance.checked_sub(consumed).ok_or(PoolError::ArithmeticOverflow)?;
        Coin::new(token_type.clone(), consumed)
    } else {
        Coin::zero(token_type.clone())
    };

    info!("pool {} user {} unstaked {}", pool.id, user, consumed);
    Ok((
        coin,
        PoolEvent::Unstake {
            pool: pool.id,
            token_type: token_type.clone(),
            user,
            unstake_amount: consumed,
            unstake_ts_ms: now_ms,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::stake::stake;
    use crate::instructions::unsubscribe::unsubscribe;
    use crate::token::Coin;

    fn unsubscribed_pool(amount: u64, unlock_countdown_ms: u64) -> (Pool, Pubkey) {
        let mut pool = Pool::new(Pubkey::new_unique(), TokenType::new("S"), unlock_countdown_ms);
        let user = Pubkey::new_unique();
        stake(&mut pool, Coin::new(TokenType::new("S"), amount), &Clock::new(0), user).unwrap();
        unsubscribe(&mut pool, &TokenType::new("S"), None, &Clock::new(0), user).unwrap();
        (pool, user)
    }

    #[test]
    fn rejects_wrong_token_type() {
        let (mut pool, user) = unsubscribed_pool(100, 1_000);
        let err = unstake(&mut pool, &TokenType::new("OTHER"), None, &Clock::new(1_000), user).unwrap_err();
        assert_eq!(err, PoolError::TokenTypeMismatch);
    }

    #[test]
    fn rejects_before_unlock_elapses() {
        let (mut pool, user) = unsubscribed_pool(100, 1_000);
        let err = unstake(&mut pool, &TokenType::new("S"), None, &Clock::new(500), user).unwrap_err();
        assert_eq!(err, PoolError::SharesNotYetExpired);
    }

    #[test]
    fn returns_full_amount_after_unlock() {
        let (mut pool, user) = unsubscribed_pool(100, 1_000);
        let (coin, event) = unstake(&mut pool, &TokenType::new("S"), None, &Clock::new(1_000), user).unwrap();
        assert_eq!(coin.amount(), 100);
        assert!(matches!(event, PoolEvent::Unstake { unstake_amount: 100, .. }));
        assert_eq!(pool.stake_balance, 0);
        assert!(pool.ledger(&user).is_err());
    }

    #[test]
    fn partial_unstake_splits_the_tranche_and_keeps_its_unlock_ms() {
        let (mut pool, user) = unsubscribed_pool(100, 1_000);
        let (coin, _) = unstake(&mut pool, &TokenType::new("S"), Some(40), &Clock::new(1_000), user).unwrap();
        assert_eq!(coin.amount(), 40);
        let ledger = pool.ledger(&user).unwrap();
        assert_eq!(ledger.deactivating.len(), 1);
        assert_eq!(ledger.deactivating[0].shares, 60);
        assert_eq!(ledger.deactivating[0].unlocked_ms, 1_000);
        assert_eq!(ledger.total_shares, 60);
    }

    #[test]
    fn rejects_requesting_more_than_is_deactivating() {
        let (mut pool, user) = unsubscribed_pool(100, 1_000);
        let err = unstake(&mut pool, &TokenType::new("S"), Some(101), &Clock::new(1_000), user).unwrap_err();
        assert_eq!(err, PoolError::DeactivatingSharesNotEnough);
    }

    #[test]
    fn consumes_older_tranches_before_newer_ones() {
        let mut pool = Pool::new(Pubkey::new_unique(), TokenType::new("S"), 1_000);
        let user = Pubkey::new_unique();
        stake(&mut pool, Coin::new(TokenType::new("S"), 200), &Clock::new(0), user).unwrap();
        unsubscribe(&mut pool, &TokenType::new("S"), Some(50), &Clock::new(0), user).unwrap();
        unsubscribe(&mut pool, &TokenType::new("S"), Some(50), &Clock::new(500), user).unwrap();
        // First tranche unlocks at 1_000, second at 1_500; request only the first.
        let (coin, _) = unstake(&mut pool, &TokenType::new("S"), Some(50), &Clock::new(1_000), user).unwrap();
        assert_eq!(coin.amount(), 50);
        let ledger = pool.ledger(&user).unwrap();
        assert_eq!(ledger.deactivating.len(), 1);
        assert_eq!(ledger.deactivating[0].unlocked_ms, 1_500);
    }

    #[test]
    fn blocked_by_an_earlier_unexpired_tranche_even_if_a_later_one_would_cover_the_request() {
        let mut pool = Pool::new(Pubkey::new_unique(), TokenType::new("S"), 1_000);
        let user = Pubkey::new_unique();
        stake(&mut pool, Coin::new(TokenType::new("S"), 200), &Clock::new(0), user).unwrap();
        unsubscribe(&mut pool, &TokenType::new("S"), Some(50), &Clock::new(900), user).unwrap();
        unsubscribe(&mut pool, &TokenType::new("S"), Some(50), &Clock::new(0), user).unwrap();
        // deactivating[0] unlocks at 1_900 (unsubscribed at 900), deactivating[1] at 1_000.
        let err = unstake(&mut pool, &TokenType::new("S"), Some(50), &Clock::new(1_000), user).unwrap_err();
        assert_eq!(err, PoolError::SharesNotYetExpired);
    }

    #[test]
    fn zero_request_is_a_noop() {
        let (mut pool, user) = unsubscribed_pool(100, 1_000);
        let (coin, event) = unstake(&mut pool, &TokenType::new("S"), Some(0), &Clock::new(1_000), user).unwrap();
        assert_eq!(coin.amount(), 0);
        assert!(matches!(event, PoolEvent::Unstake { unstake_amount: 0, .. }));
        assert_eq!(pool.ledger(&user).unwrap().deactivating[0].shares, 100);
    }
}
