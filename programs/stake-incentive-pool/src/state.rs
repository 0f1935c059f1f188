//! Per-pool accounting state.
//!
//! Mirrors the teacher's `StakingPool`/`UserStake` account records (borsh
//! persistence, `u64`-keyed counters, an explicit invariant-checking test
//! module) but widened from one reward token to a registry of independent
//! incentive programs, and from `Pubkey`-owner-identity single-tranche
//! locking to the tranche-list lifecycle spec.md §3 describes.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use log::{debug, warn};
use solana_program::pubkey::Pubkey;

use crate::clock::Clock;
use crate::error::PoolError;
use crate::math::{index_delta_for_period, period_amount_for_elapsed};
use crate::token::TokenType;

/// A single independently-parameterized incentive distribution schedule.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct IncentiveProgram {
    /// Stable identifier, assigned at creation, never reused.
    pub id: u64,
    pub token_type: TokenType,
    pub period_amount: u64,
    pub interval_ms: u64,
    pub active: bool,
    /// Always a multiple of `interval_ms` (invariant 6), except for the
    /// unrounded value set at creation (spec.md §4.2).
    pub last_allocate_ms: u64,
    /// Accumulator in units of (incentive-token units * 10^9) per share.
    pub price_index: u128,
    pub balance: u64,
    pub created_ms: u64,
    /// Lifetime tokens deposited into this program (creation + none since;
    /// the core has no top-up operation — kept for invariant I5 bookkeeping).
    pub lifetime_deposited: u64,
    /// Lifetime tokens paid out of this program via harvest/remove.
    pub lifetime_distributed: u64,
}

/// A bundle of shares in the unlock-countdown window.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeactivatingTranche {
    pub shares: u64,
    pub unsubscribed_ms: u64,
    pub unlocked_ms: u64,
    /// Per-program index at the moment of unsubscription; this tranche
    /// earns only the delta between the ledger's last-seen index and this
    /// snapshot for each program present here.
    pub snapshot_index_by_program_id: BTreeMap<u64, u128>,
}

/// Per-user record: shares, deactivating tranches, and per-program index
/// cursors.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UserShareLedger {
    pub user: Pubkey,
    pub last_stake_ms: u64,
    pub total_shares: u64,
    pub active_shares: u64,
    pub deactivating: Vec<DeactivatingTranche>,
    /// Absence means "never yet earned from this program"; baseline is 0.
    pub last_index_by_program_id: BTreeMap<u64, u128>,
}

impl UserShareLedger {
    fn new(user: Pubkey) -> Self {
        Self {
            user,
            last_stake_ms: 0,
            total_shares: 0,
            active_shares: 0,
            deactivating: Vec::new(),
            last_index_by_program_id: BTreeMap::new(),
        }
    }

    /// Invariant 2: `total_shares = active_shares + sum(tranche.shares)`.
    pub fn total_deactivating_shares(&self) -> u64 {
        self.deactivating.iter().map(|t| t.shares).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_shares == 0 && self.active_shares == 0 && self.deactivating.is_empty()
    }
}

/// The top-level accounting unit: one stake-token balance plus zero or more
/// incentive programs.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Pool {
    /// Opaque identifier assigned by the embedder at creation (spec.md §1
    /// scopes object-identity assignment out as "on-chain object storage").
    pub id: Pubkey,
    pub stake_token_type: TokenType,
    pub unlock_countdown_ms: u64,
    /// Reserved for admin pause; not gating in current semantics.
    pub active: bool,
    pub total_active_shares: u64,
    pub next_incentive_id: u64,
    pub stake_balance: u64,
    pub programs: Vec<IncentiveProgram>,
    pub user_shares: BTreeMap<Pubkey, UserShareLedger>,
}

impl Pool {
    pub fn new(id: Pubkey, stake_token_type: TokenType, unlock_countdown_ms: u64) -> Self {
        Self {
            id,
            stake_token_type,
            unlock_countdown_ms,
            active: true,
            total_active_shares: 0,
            next_incentive_id: 0,
            stake_balance: 0,
            programs: Vec::new(),
            user_shares: BTreeMap::new(),
        }
    }

    pub fn program(&self, program_idx: usize) -> Result<&IncentiveProgram, PoolError> {
        self.programs.get(program_idx).ok_or(PoolError::InvalidProgramIndex)
    }

    pub fn program_mut(&mut self, program_idx: usize) -> Result<&mut IncentiveProgram, PoolError> {
        self.programs.get_mut(program_idx).ok_or(PoolError::InvalidProgramIndex)
    }

    /// Advance every active program's index to the clock-aligned boundary.
    /// Called at the start of every mutating/harvest operation (spec.md
    /// §4.3). Idempotent for a given `now_ms` (invariant 6 / testable
    /// property I6): calling twice at the same clock value advances no
    /// further, because `aligned_now > last_allocate_ms` is false the
    /// second time.
    pub fn allocate_incentive(&mut self, clock: &Clock) -> Result<(), PoolError> {
        let now_ms = clock.now_ms();
        for program in self.programs.iter_mut() {
            if !program.active {
                continue;
            }
            let aligned_now = (now_ms / program.interval_ms) * program.interval_ms;
            if aligned_now <= program.last_allocate_ms {
                continue;
            }
            let elapsed = aligned_now - program.last_allocate_ms;
            let period_amount =
                period_amount_for_elapsed(program.period_amount, elapsed, program.interval_ms)?;
            if self.total_active_shares > 0 {
                let delta = index_delta_for_period(period_amount, self.total_active_shares)?;
                program.price_index = program
                    .price_index
                    .checked_add(delta)
                    .ok_or(PoolError::ArithmeticOverflow)?;
            } else {
                warn!(
                    "program {} skipped allocation of {} units: no active shares",
                    program.id, period_amount
                );
            }
            program.last_allocate_ms = aligned_now;
        }
        debug!("allocate_incentive at {} ms: {} programs processed", now_ms, self.programs.len());
        Ok(())
    }

    /// Snapshot of every program's current `price_index`, keyed by program
    /// `id`. Used both to seed a freshly-staking user's cursor (stake
    /// overwrites it wholesale, per spec.md §9) and to freeze a tranche's
    /// cap at unsubscription.
    pub fn index_snapshot(&self) -> BTreeMap<u64, u128> {
        self.programs.iter().map(|p| (p.id, p.price_index)).collect()
    }

    fn ledger_mut(&mut self, user: &Pubkey) -> Result<&mut UserShareLedger, PoolError> {
        let ledger = self.user_shares.get_mut(user).ok_or(PoolError::UserShareNotFound)?;
        if ledger.user != *user {
            return Err(PoolError::UserMismatch);
        }
        Ok(ledger)
    }

    pub fn ledger(&self, user: &Pubkey) -> Result<&UserShareLedger, PoolError> {
        let ledger = self.user_shares.get(user).ok_or(PoolError::UserShareNotFound)?;
        if ledger.user != *user {
            return Err(PoolError::UserMismatch);
        }
        Ok(ledger)
    }

    /// Lazily create, then return, the ledger for `user`.
    pub(crate) fn ledger_entry(&mut self, user: Pubkey) -> &mut UserShareLedger {
        self.user_shares.entry(user).or_insert_with(|| UserShareLedger::new(user))
    }

    /// Remove `user`'s ledger if it has gone fully empty (spec.md §3
    /// lifecycle: destroyed iff `total_shares = 0 ∧ active_shares = 0 ∧
    /// deactivating = ∅`).
    pub(crate) fn prune_ledger_if_empty(&mut self, user: &Pubkey) {
        if let Some(ledger) = self.user_shares.get(user) {
            if ledger.is_empty() {
                self.user_shares.remove(user);
            }
        }
    }

    /// Re-borrow helper used by operations that need the ledger after
    /// mutating other pool fields (avoids the double-mutable-borrow that
    /// comes from holding a `&mut UserShareLedger` across a call that also
    /// needs `&mut self.programs`).
    pub(crate) fn with_ledger_mut<R>(
        &mut self,
        user: &Pubkey,
        f: impl FnOnce(&mut UserShareLedger) -> Result<R, PoolError>,
    ) -> Result<R, PoolError> {
        f(self.ledger_mut(user)?)
    }

    /// Invariant 1: `total_active_shares = sum over users of active_shares`.
    pub fn sum_of_active_shares(&self) -> u64 {
        self.user_shares.values().map(|l| l.active_shares).sum()
    }

    /// Invariant 3: `stake_balance >= sum over users of total_shares`.
    pub fn sum_of_total_shares(&self) -> u64 {
        self.user_shares.values().map(|l| l.total_shares).sum()
    }
}
