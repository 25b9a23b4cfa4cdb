//! Event definitions

use anchor_lang::prelude::*;

/// Event emitted when an auction is created
#[event]
pub struct AuctionInitialized {
    pub auction: Pubkey,
    pub authority: Pubkey,
    pub sale_mint: Pubkey,
    pub payment_mint: Pubkey,
    pub start_slot: u64,
    pub slots_per_period: u64,
    pub token_per_period: u64,
    pub initial_price: u128,
}

/// Event emitted on every purchase
#[event]
pub struct TokensPurchased {
    pub auction: Pubkey,
    pub buyer: Pubkey,
    pub tokens: u64,
    pub cost: u64,
    pub price: u128,
    pub period: u64,
    pub slot: u64,
}

/// Event emitted when elapsed periods are settled
#[event]
pub struct PriceUpdated {
    pub auction: Pubkey,
    pub period: u64,
    pub price: u128,
}

#[event]
pub struct PriceOverridden {
    pub auction: Pubkey,
    pub old_price: u128,
    pub new_price: u128,
}

#[event]
pub struct ProceedsWithdrawn {
    pub auction: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}

#[event]
pub struct AuctionShutdown {
    pub auction: Pubkey,
    pub slot: u64,
}

/// Event emitted when a vault is topped up by anyone
#[event]
pub struct VaultFunded {
    pub vault: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub balance: u64,
}

/// Event emitted when either engine changes hands
#[event]
pub struct AuthorityTransferred {
    pub account: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

#[event]
pub struct FarmInitialized {
    pub farm: Pubkey,
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_per_slot: u64,
    pub start_slot: u64,
    pub bonus_end_slot: u64,
    pub bonus_multiplier: u64,
}

#[event]
pub struct PoolAdded {
    pub farm: Pubkey,
    pub pool: Pubkey,
    pub index: u64,
    pub staked_mint: Pubkey,
    pub alloc_points: u64,
    pub total_alloc_points: u64,
}

#[event]
pub struct PoolWeightChanged {
    pub farm: Pubkey,
    pub index: u64,
    pub old_alloc_points: u64,
    pub new_alloc_points: u64,
    pub total_alloc_points: u64,
}

#[event]
pub struct Deposited {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub reward_paid: u64,
}

#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub reward_paid: u64,
}

#[event]
pub struct EmergencyWithdrawn {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardWithdrawn {
    pub farm: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}

#[event]
pub struct MigratorSet {
    pub farm: Pubkey,
    pub migrator: Pubkey,
}
