//! State structures for the Nova Distribution program.
//!
//! This module defines all account structures used to store program state,
//! together with the auction and reward-ledger algorithms that operate on
//! them.

pub mod auction;
pub mod farm;
pub mod farm_pool;
pub mod user_stake;

pub use auction::*;
pub use farm::*;
pub use farm_pool::*;
pub use user_stake::*;
