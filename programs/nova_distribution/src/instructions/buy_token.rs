/// Buy token instruction handler.
///
/// Sells sale tokens at the current period price, first come first served
/// within the period allocation.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::{PriceUpdated, TokensPurchased};
use crate::state::Auction;

/// Accounts required for a purchase.
#[derive(Accounts)]
pub struct BuyToken<'info> {
    /// The buyer paying for tokens.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// The auction.
    #[account(
        mut,
        seeds = [AUCTION_SEED, auction.sale_mint.as_ref()],
        bump = auction.bump,
        has_one = sale_vault @ DistributionError::VaultMismatch,
        has_one = proceeds_vault @ DistributionError::VaultMismatch
    )]
    pub auction: Account<'info, Auction>,

    /// Buyer's payment token account.
    #[account(
        mut,
        constraint = buyer_payment_account.mint == auction.payment_mint @ DistributionError::MintMismatch,
        constraint = buyer_payment_account.owner == buyer.key()
    )]
    pub buyer_payment_account: Account<'info, TokenAccount>,

    /// Buyer's account receiving sale tokens.
    #[account(
        mut,
        constraint = buyer_sale_account.mint == auction.sale_mint @ DistributionError::MintMismatch,
        constraint = buyer_sale_account.owner == buyer.key()
    )]
    pub buyer_sale_account: Account<'info, TokenAccount>,

    /// Auction's sale token vault.
    #[account(mut)]
    pub sale_vault: Account<'info, TokenAccount>,

    /// Auction's proceeds vault.
    #[account(mut)]
    pub proceeds_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Buy sale tokens with up to `payment_amount` of the payment token.
///
/// The request is clamped to what is left of the period allocation and to the
/// sale vault balance; a clamped buyer pays only for what they receive.
///
/// # Arguments
/// * `ctx` - BuyToken accounts context
/// * `payment_amount` - Maximum payment to spend
/// * `min_tokens_out` - Revert if fewer tokens would be delivered
pub fn handler(ctx: Context<BuyToken>, payment_amount: u64, min_tokens_out: u64) -> Result<()> {
    let clock = Clock::get()?;
    let vault_balance = ctx.accounts.sale_vault.amount;

    let auction = &mut ctx.accounts.auction;
    let settled_period = auction.last_transacted_period;
    let fill = auction.fill_order(clock.slot, payment_amount, vault_balance)?;
    require!(
        fill.tokens >= min_tokens_out,
        DistributionError::SlippageExceeded
    );

    let auction_key = auction.key();
    let period = auction.last_transacted_period;
    let sale_mint_key = auction.sale_mint;
    let bump = auction.bump;
    let sold_in_period = auction.last_token_sold_in_period;

    if period != settled_period {
        emit!(PriceUpdated {
            auction: auction_key,
            period,
            price: fill.price,
        });
    }

    // Payment in
    let cpi_accounts = Transfer {
        from: ctx.accounts.buyer_payment_account.to_account_info(),
        to: ctx.accounts.proceeds_vault.to_account_info(),
        authority: ctx.accounts.buyer.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), fill.cost)?;

    // Tokens out, signed by the auction PDA
    let seeds = &[AUCTION_SEED, sale_mint_key.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.sale_vault.to_account_info(),
        to: ctx.accounts.buyer_sale_account.to_account_info(),
        authority: ctx.accounts.auction.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, fill.tokens)?;

    msg!(
        "Sold {} tokens for {} at price {} (period {})",
        fill.tokens,
        fill.cost,
        fill.price,
        period
    );
    msg!("Sold in period: {}", sold_in_period);

    emit!(TokensPurchased {
        auction: auction_key,
        buyer: ctx.accounts.buyer.key(),
        tokens: fill.tokens,
        cost: fill.cost,
        price: fill.price,
        period,
        slot: clock.slot,
    });

    Ok(())
}
