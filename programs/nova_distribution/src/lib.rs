//! # Nova Distribution Program
//!
//! Two token distribution engines for the NOVA token:
//!
//! - **Sale auction**: sells a fixed allocation per period at a price that
//!   reacts to demand. Selling more than half of a period's allocation pushes
//!   the next price up, selling less pushes it down.
//! - **Reward farm**: emits a reward token per slot across weighted staking
//!   pools, split pro rata between stakers with an accumulated
//!   reward-per-share ledger and an early bonus window.
//!
//! ## Features
//! - Ray-scaled (1e27) prices with exact rounding rules
//! - Lazy settlement: idle periods and pools catch up on the next touch
//! - Reward payouts capped at the funded reward vault
//! - Admin price override, emergency shutdown and emergency withdraw
//! - Safe math with overflow protection
//!
//! ## Devnet Only
//! This program is configured for Solana devnet deployment only.

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

#[program]
pub mod nova_distribution {
    use super::*;

    /// Creates a sale auction for `sale_mint` paid in `payment_mint`.
    ///
    /// # Errors
    /// Returns an error if the period length is zero, the period allocation
    /// is below 2, sensitivity is at most 1.0 or above 100.0, or the opening
    /// price is zero.
    pub fn initialize_auction(
        ctx: Context<InitializeAuction>,
        params: AuctionParams,
    ) -> Result<()> {
        instructions::initialize_auction::handler(ctx, params)
    }

    /// Deposits sale tokens into the auction vault. Permissionless.
    pub fn fund_auction(ctx: Context<FundAuction>, amount: u64) -> Result<()> {
        instructions::fund::fund_auction_handler(ctx, amount)
    }

    /// Buys sale tokens for up to `payment_amount` payment tokens.
    ///
    /// # Arguments
    /// * `ctx` - The context containing buyer and auction accounts
    /// * `payment_amount` - Maximum payment to spend
    /// * `min_tokens_out` - Minimum tokens to receive
    ///
    /// # Errors
    /// Returns an error if:
    /// - The auction has not started or is shut down
    /// - Payment is zero or too small to buy a single unit
    /// - Nothing is left for sale in this period
    /// - Fewer than `min_tokens_out` tokens would be delivered
    pub fn buy_token(ctx: Context<BuyToken>, payment_amount: u64, min_tokens_out: u64) -> Result<()> {
        instructions::buy_token::handler(ctx, payment_amount, min_tokens_out)
    }

    /// Settles elapsed periods and stores the current price. Permissionless.
    pub fn update_price(ctx: Context<UpdatePrice>) -> Result<()> {
        instructions::update_price::handler(ctx)
    }

    /// Admin function to override the current price.
    ///
    /// # Errors
    /// Returns an error if caller is not the admin or the price is zero.
    pub fn update_price_manually(ctx: Context<AuctionAdmin>, new_price: u128) -> Result<()> {
        instructions::auction_admin::update_price_manually_handler(ctx, new_price)
    }

    /// Admin function to stop all further sales.
    pub fn emergency_shutdown(ctx: Context<AuctionAdmin>) -> Result<()> {
        instructions::auction_admin::emergency_shutdown_handler(ctx)
    }

    /// Admin function to withdraw sale proceeds.
    ///
    /// # Errors
    /// Returns an error if caller is not the admin, the amount is zero or
    /// exceeds the proceeds vault balance.
    pub fn withdraw_proceeds(ctx: Context<WithdrawProceeds>, amount: u64) -> Result<()> {
        instructions::auction_admin::withdraw_proceeds_handler(ctx, amount)
    }

    /// Admin function to hand the auction to a new authority.
    pub fn transfer_auction_authority(
        ctx: Context<AuctionAdmin>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::auction_admin::transfer_auction_authority_handler(ctx, new_authority)
    }

    /// Creates a reward farm emitting `reward_mint`.
    ///
    /// # Errors
    /// Returns an error if the bonus window ends before the start slot or the
    /// bonus multiplier is out of range.
    pub fn initialize_farm(ctx: Context<InitializeFarm>, params: FarmParams) -> Result<()> {
        instructions::initialize_farm::handler(ctx, params)
    }

    /// Deposits reward tokens into the farm vault. Permissionless.
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund::fund_rewards_handler(ctx, amount)
    }

    /// Admin function to add a staking pool.
    ///
    /// # Arguments
    /// * `ctx` - The context; with `with_mass_update` every existing pool
    ///   is passed in remaining accounts
    /// * `alloc_points` - Weight of the new pool
    /// * `with_mass_update` - Settle existing pools first
    pub fn add_pool<'info>(
        ctx: Context<'_, '_, 'info, 'info, AddPool<'info>>,
        alloc_points: u64,
        with_mass_update: bool,
    ) -> Result<()> {
        instructions::add_pool::handler(ctx, alloc_points, with_mass_update)
    }

    /// Admin function to change a pool's weight.
    pub fn set_pool<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetPool<'info>>,
        pool_id: u64,
        alloc_points: u64,
        with_mass_update: bool,
    ) -> Result<()> {
        instructions::set_pool::handler(ctx, pool_id, alloc_points, with_mass_update)
    }

    /// Settles one pool's reward accumulator. Permissionless.
    pub fn update_pool(ctx: Context<UpdatePool>) -> Result<()> {
        instructions::update_pool::update_pool_handler(ctx)
    }

    /// Settles every pool of the farm. Permissionless.
    pub fn mass_update_pools<'info>(
        ctx: Context<'_, '_, 'info, 'info, MassUpdatePools<'info>>,
    ) -> Result<()> {
        instructions::update_pool::mass_update_pools_handler(ctx)
    }

    /// Stakes tokens in a pool, paying out pending rewards.
    ///
    /// # Errors
    /// Returns an error if the pool does not exist or accounts mismatch.
    pub fn deposit(ctx: Context<Deposit>, pool_id: u64, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, pool_id, amount)
    }

    /// Unstakes tokens from a pool, paying out pending rewards.
    ///
    /// # Errors
    /// Returns an error if `amount` exceeds the user's stake.
    pub fn withdraw(ctx: Context<Withdraw>, pool_id: u64, amount: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, pool_id, amount)
    }

    /// Returns the whole stake and forfeits unpaid rewards.
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, pool_id: u64) -> Result<()> {
        instructions::emergency_withdraw::handler(ctx, pool_id)
    }

    /// Admin function to reclaim reward tokens.
    pub fn withdraw_reward(ctx: Context<WithdrawReward>, amount: u64) -> Result<()> {
        instructions::farm_admin::withdraw_reward_handler(ctx, amount)
    }

    /// Admin function to record the pool migration hook.
    pub fn set_migrator(ctx: Context<FarmAdmin>, migrator: Pubkey) -> Result<()> {
        instructions::farm_admin::set_migrator_handler(ctx, migrator)
    }

    /// Admin function to hand the farm to a new authority.
    pub fn transfer_farm_authority(ctx: Context<FarmAdmin>, new_authority: Pubkey) -> Result<()> {
        instructions::farm_admin::transfer_farm_authority_handler(ctx, new_authority)
    }
}
