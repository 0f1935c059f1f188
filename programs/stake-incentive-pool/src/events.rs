//! Event payloads.
//!
//! spec.md §1 scopes event *publishing* out of the core ("the core only
//! defines *what* events occur and their contents"); the teacher's
//! `emit_reward_payout` packs a fixed byte layout and ships it via
//! `sol_log_data` because it runs inside a validator. This crate has no
//! transport to ship events over, so every operation instead returns the
//! event it caused as plain data — the embedder decides how (or whether) to
//! publish it.

use std::collections::BTreeMap;

use solana_program::pubkey::Pubkey;

use crate::token::TokenType;

/// One event per spec.md §6. `pool` identifies the pool the way the
/// teacher's events carry a `pool` account key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    NewPool {
        pool: Pubkey,
        stake_token_type: TokenType,
        unlock_countdown_ms: u64,
    },
    CreateIncentiveProgram {
        pool: Pubkey,
        program_id: u64,
        token_type: TokenType,
        period_amount: u64,
        interval_ms: u64,
        initial_balance: u64,
    },
    DeactivateIncentiveProgram {
        pool: Pubkey,
        program_id: u64,
    },
    ActivateIncentiveProgram {
        pool: Pubkey,
        program_id: u64,
    },
    RemoveIncentiveProgram {
        pool: Pubkey,
        program_id: u64,
        returned_amount: u64,
    },
    UpdateUnlockCountdownTsMs {
        pool: Pubkey,
        new_unlock_countdown_ms: u64,
    },
    UpdateIncentiveConfig {
        pool: Pubkey,
        program_id: u64,
        new_period_amount: Option<u64>,
        new_interval_ms: Option<u64>,
    },
    Stake {
        pool: Pubkey,
        token_type: TokenType,
        user: Pubkey,
        /// Total shares (active + deactivating) the user holds after this stake.
        stake_amount: u64,
        stake_ts_ms: u64,
        last_index_snapshot: BTreeMap<u64, u128>,
    },
    Unsubscribe {
        pool: Pubkey,
        token_type: TokenType,
        user: Pubkey,
        unsubscribed_shares: u64,
        unsubscribe_ts_ms: u64,
        unlocked_ts_ms: u64,
    },
    Unstake {
        pool: Pubkey,
        token_type: TokenType,
        user: Pubkey,
        unstake_amount: u64,
        unstake_ts_ms: u64,
    },
    Harvest {
        pool: Pubkey,
        incentive_token_type: TokenType,
        user: Pubkey,
        harvest_amount: u64,
    },
}
