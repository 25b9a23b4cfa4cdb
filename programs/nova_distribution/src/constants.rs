//! Program constants for the Nova Distribution program.
//!
//! This module defines PDA seeds, fixed-point scales and the default
//! parameters used by the sale auction and the liquidity mining farm.

/// Seed for deriving the auction PDA
pub const AUCTION_SEED: &[u8] = b"auction";

/// Seed for deriving the auction's sale token vault PDA
pub const SALE_VAULT_SEED: &[u8] = b"sale_vault";

/// Seed for deriving the auction's payment proceeds vault PDA
pub const PROCEEDS_VAULT_SEED: &[u8] = b"proceeds_vault";

/// Seed for deriving the farm PDA
pub const FARM_SEED: &[u8] = b"farm";

/// Seed for deriving the farm's reward vault PDA
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Seed for deriving farm pool PDAs
pub const FARM_POOL_SEED: &[u8] = b"farm_pool";

/// Seed for deriving a farm pool's staked token vault PDA
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed for deriving user stake account PDAs
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

/// Fixed-point scale for auction prices (27 decimals).
///
/// A price of `RAY` means one payment unit per sale token unit.
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;

/// Precision multiplier for the reward-per-share accumulator (10^18)
pub const ACC_REWARD_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Default auction sensitivity: a period with no sales halves the price.
pub const DEFAULT_SENSITIVITY: u128 = 2 * RAY;

/// Upper bound on auction sensitivity: an empty period lowers the price by at
/// least 1%.
pub const MAX_SENSITIVITY: u128 = 100 * RAY;

/// Upper bound on the farm bonus multiplier
pub const MAX_BONUS_MULTIPLIER: u64 = 100;
