//! One file per operation, mirroring the teacher's instruction-handler
//! layout (`process_stake`, `process_claim_rewards`, ...) but over owned
//! `Pool` values instead of `AccountInfo` slices.

pub mod activate_incentive_program;
pub mod create_incentive_program;
pub mod deactivate_incentive_program;
pub mod harvest;
pub mod new_pool;
pub mod remove_incentive_program;
pub mod stake;
pub mod unstake;
pub mod unsubscribe;
pub mod update_incentive_config;
pub mod update_unlock_countdown;

pub use activate_incentive_program::*;
pub use create_incentive_program::*;
pub use deactivate_incentive_program::*;
pub use harvest::*;
pub use new_pool::*;
pub use remove_incentive_program::*;
pub use stake::*;
pub use unstake::*;
pub use unsubscribe::*;
pub use update_incentive_config::*;
pub use update_unlock_countdown::*;
