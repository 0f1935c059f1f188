//! Multi-program incentive accounting core for a time-locked share staking
//! pool.
//!
//! This crate is the accounting engine only: given a [`state::Pool`] and an
//! externally-supplied [`clock::Clock`], each function in [`instructions`]
//! applies one state transition and returns the event it caused. It reads
//! or writes no accounts, holds no wallet, signs nothing, and persists
//! nothing on its own — an embedder (an on-chain program, a test harness, a
//! simulator) owns storage, clock sourcing, event transport, and access
//! control, and drives this crate by constructing a `Pool`, calling an
//! instruction function, and persisting the `Pool` it returns.
//!
//! Incentive accrual uses a price-index accumulator per incentive program
//! (see [`math`]): each program tracks incentive units owed per share,
//! advanced in whole-interval steps by [`state::Pool::allocate_incentive`].
//! A user's shares earn the delta between the program's current index and
//! the index last seen by that user's ledger. Unsubscribing shares moves
//! them into a time-locked [`state::DeactivatingTranche`] whose yield is
//! capped at the index snapshot taken at unsubscription; unstaking later
//! consumes expired tranches FIFO.

pub mod capability;
pub mod clock;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod token;
