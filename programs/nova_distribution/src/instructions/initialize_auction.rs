/// Initialize auction instruction handler.
///
/// Creates the sale auction and its two vaults.
///
/// ## Security Guarantees
/// - Sale and proceeds vaults are PDAs owned by the auction
/// - Mints are locked to auction state permanently
/// - All parameters validated before storage

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::AuctionInitialized;
use crate::state::Auction;

/// Immutable sale parameters plus the opening price.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuctionParams {
    /// First slot purchases are accepted.
    pub start_slot: u64,
    /// Length of one pricing period in slots.
    pub slots_per_period: u64,
    /// Maximum units sold per period; the price target is half of it.
    pub token_per_period: u64,
    /// Ray-scaled dampening of downward price moves, in `(1.0, 100.0]`
    /// (2.0 halves the price after an empty period).
    pub sensitivity: u128,
    /// Ray-scaled opening price, payment units per sale unit.
    pub initial_price: u128,
}

impl AuctionParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.slots_per_period > 0, DistributionError::InvalidPeriodLength);
        require!(self.token_per_period >= 2, DistributionError::InvalidTokenPerPeriod);
        require!(
            self.sensitivity > RAY && self.sensitivity <= MAX_SENSITIVITY,
            DistributionError::InvalidSensitivity
        );
        require!(self.initial_price > 0, DistributionError::InvalidPrice);
        Ok(())
    }
}

/// Accounts required for auction initialization.
///
/// ## Security Notes
/// - `sale_vault` and `proceeds_vault` are PDAs with `auction` as authority
/// - Seeds ensure these accounts cannot be swapped or replaced
#[derive(Accounts)]
pub struct InitializeAuction<'info> {
    /// The admin authority that will control the auction.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The auction account to be created, one per sale mint.
    #[account(
        init,
        payer = authority,
        space = Auction::LEN,
        seeds = [AUCTION_SEED, sale_mint.key().as_ref()],
        bump
    )]
    pub auction: Account<'info, Auction>,

    /// The token being sold.
    pub sale_mint: Account<'info, Mint>,

    /// The token buyers pay with.
    pub payment_mint: Account<'info, Mint>,

    /// Vault holding tokens for sale.
    #[account(
        init,
        payer = authority,
        seeds = [SALE_VAULT_SEED, auction.key().as_ref()],
        bump,
        token::mint = sale_mint,
        token::authority = auction
    )]
    pub sale_vault: Account<'info, TokenAccount>,

    /// Vault receiving buyer payments.
    #[account(
        init,
        payer = authority,
        seeds = [PROCEEDS_VAULT_SEED, auction.key().as_ref()],
        bump,
        token::mint = payment_mint,
        token::authority = auction
    )]
    pub proceeds_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new sale auction.
///
/// # Arguments
/// * `ctx` - InitializeAuction accounts context
/// * `params` - Sale parameters
pub fn handler(ctx: Context<InitializeAuction>, params: AuctionParams) -> Result<()> {
    params.validate()?;

    let clock = Clock::get()?;
    let auction = &mut ctx.accounts.auction;

    auction.authority = ctx.accounts.authority.key();
    auction.sale_mint = ctx.accounts.sale_mint.key();
    auction.payment_mint = ctx.accounts.payment_mint.key();
    auction.sale_vault = ctx.accounts.sale_vault.key();
    auction.proceeds_vault = ctx.accounts.proceeds_vault.key();

    auction.start_slot = params.start_slot;
    auction.slots_per_period = params.slots_per_period;
    auction.token_per_period = params.token_per_period;
    auction.sensitivity = params.sensitivity;

    auction.last_price = params.initial_price;
    auction.last_transacted_period = 0;
    auction.last_token_sold_in_period = 0;
    auction.shutdown = false;

    auction.total_sold = 0;
    auction.total_proceeds = 0;
    auction.created_at = clock.unix_timestamp;

    auction.bump = ctx.bumps.auction;
    auction.sale_vault_bump = ctx.bumps.sale_vault;
    auction.proceeds_vault_bump = ctx.bumps.proceeds_vault;

    msg!("Nova sale auction initialized");
    msg!("Admin: {}", auction.authority);
    msg!("Sale mint: {}, payment mint: {}", auction.sale_mint, auction.payment_mint);
    msg!(
        "Start slot: {}, slots per period: {}, token per period: {}",
        params.start_slot,
        params.slots_per_period,
        params.token_per_period
    );

    emit!(AuctionInitialized {
        auction: auction.key(),
        authority: auction.authority,
        sale_mint: auction.sale_mint,
        payment_mint: auction.payment_mint,
        start_slot: params.start_slot,
        slots_per_period: params.slots_per_period,
        token_per_period: params.token_per_period,
        initial_price: params.initial_price,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AuctionParams {
        AuctionParams {
            start_slot: 100,
            slots_per_period: 43_200,
            token_per_period: 600_000_000_000,
            sensitivity: DEFAULT_SENSITIVITY,
            initial_price: 10 * RAY,
        }
    }

    #[test]
    fn test_valid_params() {
        assert!(params().validate().is_ok());
        let params = AuctionParams {
            sensitivity: MAX_SENSITIVITY,
            ..params()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_params() {
        let cases = [
            (
                AuctionParams { slots_per_period: 0, ..params() },
                DistributionError::InvalidPeriodLength,
            ),
            (
                AuctionParams { token_per_period: 1, ..params() },
                DistributionError::InvalidTokenPerPeriod,
            ),
            (
                AuctionParams { sensitivity: RAY, ..params() },
                DistributionError::InvalidSensitivity,
            ),
            (
                AuctionParams { sensitivity: MAX_SENSITIVITY + 1, ..params() },
                DistributionError::InvalidSensitivity,
            ),
            (
                AuctionParams { initial_price: 0, ..params() },
                DistributionError::InvalidPrice,
            ),
        ];
        for (params, expected) in cases {
            assert_eq!(params.validate().unwrap_err(), expected.into());
        }
    }
}
