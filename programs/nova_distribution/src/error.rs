//! Error types for the Nova Distribution program.
//!
//! Every failure aborts the whole instruction; nothing is partially applied.
//!
//! ## Error Code Ranges
//! - 6000-6001: Lifecycle errors
//! - 6002-6009: Input validation errors
//! - 6010-6014: State/balance errors
//! - 6015-6017: Math/overflow errors
//! - 6018-6019: Authorization errors
//! - 6020-6023: Account validation errors

use anchor_lang::prelude::*;

/// Custom error codes for the Nova Distribution program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum DistributionError {
    // ========== Lifecycle Errors (6000-6001) ==========

    /// [6000] The auction or farm has not reached its start slot.
    #[msg("Not started: current slot is before the configured start slot")]
    NotStarted,

    /// [6001] The auction was permanently shut down by its authority.
    #[msg("Auction is on shutdown")]
    ShutDown,

    // ========== Input Validation Errors (6002-6009) ==========

    /// [6002] Amount must be greater than zero.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6003] Prices must be strictly positive.
    #[msg("Price must be greater than zero")]
    InvalidPrice,

    /// [6004] Period length must be at least one slot.
    #[msg("Slots per period must be greater than zero")]
    InvalidPeriodLength,

    /// [6005] The per-period sale target must be at least two units.
    #[msg("Token per period must be at least 2 units")]
    InvalidTokenPerPeriod,

    /// [6006] Sensitivity must lie in (1.0, MAX_SENSITIVITY]; at 1.0 an empty period zeroes the price.
    #[msg("Sensitivity must be above 1.0 and at most 100.0 (RAY scaled)")]
    InvalidSensitivity,

    /// [6007] The bonus window must not end before mining starts.
    #[msg("Bonus end slot must not be before start slot")]
    InvalidBonusWindow,

    /// [6008] Bonus multiplier outside the supported range.
    #[msg("Bonus multiplier must be between 1 and 100")]
    InvalidBonusMultiplier,

    /// [6009] Purchase delivered fewer tokens than the buyer's minimum.
    #[msg("Purchase would deliver fewer tokens than requested minimum")]
    SlippageExceeded,

    // ========== State/Balance Errors (6010-6014) ==========

    /// [6010] A vault holds less than the requested withdrawal.
    #[msg("Insufficient balance for this operation")]
    InsufficientBalance,

    /// [6011] User does not have enough staked tokens for the withdrawal.
    #[msg("Insufficient staked balance for this operation")]
    InsufficientStake,

    /// [6012] Period capacity or sale vault is exhausted.
    #[msg("No tokens left for sale in this period")]
    SoldOut,

    /// [6013] Pool id is outside the created range, or misplaced or read-only
    /// in a mass settlement.
    #[msg("Pool id is out of range, out of index order or not writable")]
    InvalidPool,

    /// [6014] Mass update requires every pool, in index order.
    #[msg("Every farm pool must be supplied, in index order")]
    IncompletePoolSet,

    // ========== Math/Overflow Errors (6015-6017) ==========

    /// [6015] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    /// [6016] Division by zero attempted.
    #[msg("Division by zero attempted")]
    DivisionByZero,

    /// [6017] Integer conversion failed (value out of range).
    #[msg("Integer conversion failed - value out of range")]
    ConversionOverflow,

    // ========== Authorization Errors (6018-6019) ==========

    /// [6018] Unauthorized - caller is not the admin.
    #[msg("Unauthorized: caller is not the authority")]
    Unauthorized,

    /// [6019] Unauthorized - signer does not own the stake record.
    #[msg("Unauthorized: signer does not match stake owner")]
    InvalidStakeOwner,

    // ========== Account Validation Errors (6020-6023) ==========

    /// [6020] The provided mint does not match the expected mint.
    #[msg("Token mint mismatch")]
    MintMismatch,

    /// [6021] The provided vault does not match the stored vault.
    #[msg("Vault address mismatch")]
    VaultMismatch,

    /// [6022] The stake record belongs to another pool.
    #[msg("User stake account does not belong to this pool")]
    StakePoolMismatch,

    /// [6023] The pool belongs to another farm.
    #[msg("Farm pool does not belong to this farm")]
    FarmMismatch,
}
