//! Fixed-point price-index arithmetic.
//!
//! Scale factor: 10^9. Every multiply that feeds a narrowing conversion is
//! carried out in a 256-bit intermediate (the teacher's pattern for
//! `wad_mul`/`wad_div`, here applied to a linear rather than exponential
//! accrual formula) so the multiply itself cannot silently wrap; only the
//! final narrowing back to `u64`/`u128` can fail, and it fails loudly.

use crate::error::PoolError;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for multiply-then-narrow index math.
    pub struct U256(4);
}

/// Fixed-point base: 10^9.
pub const BASE: u128 = 1_000_000_000;

impl U256 {
    /// Create a `U256` from a `u128`.
    pub const fn from_u128(val: u128) -> Self {
        U256([val as u64, (val >> 64) as u64, 0, 0])
    }

    /// Narrow to `u128`, returning `None` if the value doesn't fit.
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[2] != 0 || self.0[3] != 0 {
            return None;
        }
        Some((self.0[1] as u128) << 64 | self.0[0] as u128)
    }

    /// Narrow to `u64`, returning `None` if the value doesn't fit.
    pub fn to_u64(&self) -> Option<u64> {
        match self.to_u128() {
            Some(v) if v <= u64::MAX as u128 => Some(v as u64),
            _ => None,
        }
    }
}

fn mul_div_u256(a: U256, b: U256, denom: U256) -> Result<U256, PoolError> {
    debug_assert!(!denom.is_zero(), "caller must special-case a zero denominator");
    let product = a.checked_mul(b).ok_or(PoolError::ArithmeticOverflow)?;
    Ok(product / denom)
}

/// `period_amount = (config.period_amount * elapsed_ms) / interval_ms`, per
/// spec.md §4.3. `interval_ms` is asserted non-zero by every call site
/// (it is a required-positive program config field).
pub fn period_amount_for_elapsed(
    period_amount: u64,
    elapsed_ms: u64,
    interval_ms: u64,
) -> Result<u64, PoolError> {
    let r = mul_div_u256(
        U256::from(period_amount),
        U256::from(elapsed_ms),
        U256::from(interval_ms),
    )?;
    r.to_u64().ok_or(PoolError::ArithmeticOverflow)
}

/// `delta = (10^9 * period_amount) / total_active_shares`. Caller must
/// guard `total_active_shares == 0` beforehand (spec.md §4.1: the period is
/// silently skipped rather than divided by zero).
pub fn index_delta_for_period(period_amount: u64, total_active_shares: u64) -> Result<u128, PoolError> {
    debug_assert_ne!(total_active_shares, 0);
    let r = mul_div_u256(
        U256::from_u128(BASE),
        U256::from(period_amount),
        U256::from(total_active_shares),
    )?;
    r.to_u128().ok_or(PoolError::ArithmeticOverflow)
}

/// `amount = (shares * delta_index) / 10^9`, the core IndexMath formula
/// shared by stake-snapshotting, unsubscribe-snapshotting, and harvest.
pub fn owed_for_shares(shares: u64, delta_index: u128) -> Result<u64, PoolError> {
    let r = mul_div_u256(
        U256::from(shares),
        U256::from_u128(delta_index),
        U256::from_u128(BASE),
    )?;
    r.to_u64().ok_or(PoolError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_amount_exact_interval() {
        assert_eq!(period_amount_for_elapsed(10_000_000, 60_000, 60_000).unwrap(), 10_000_000);
    }

    #[test]
    fn period_amount_partial_interval_floors() {
        // 7/10 of a period, should floor rather than round.
        assert_eq!(period_amount_for_elapsed(10, 42_000, 60_000).unwrap(), 7);
    }

    #[test]
    fn index_delta_matches_spec_example() {
        // 10^9 * 10^7 / 10^9 = 10^7
        assert_eq!(index_delta_for_period(10_000_000, 1_000_000_000).unwrap(), 10_000_000);
    }

    #[test]
    fn owed_round_trips_a_full_period() {
        let delta = index_delta_for_period(10_000_000, 1_000_000_000).unwrap();
        assert_eq!(owed_for_shares(1_000_000_000, delta).unwrap(), 10_000_000);
    }

    #[test]
    fn owed_floors_fractional_shares_of_index() {
        // shares=10^7, delta=3 (3e-7 per share) => 10^7*3/10^9 = 0 (floors)
        assert_eq!(owed_for_shares(10_000_000, 3).unwrap(), 0);
    }

    #[test]
    fn narrowing_overflow_is_reported() {
        let huge = u128::MAX;
        let err = owed_for_shares(u64::MAX, huge).unwrap_err();
        assert_eq!(err, PoolError::ArithmeticOverflow);
    }

    #[test]
    fn u256_u128_roundtrip() {
        let v = U256::from_u128(123_456_789_012_345_678_901_234_567_890u128 % (1u128 << 127));
        assert_eq!(U256::from_u128(v.to_u128().unwrap()), v);
    }
}
