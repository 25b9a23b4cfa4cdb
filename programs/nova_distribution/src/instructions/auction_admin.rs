/// Auction admin instruction handlers.
///
/// ## Security Guarantees
/// - All admin functions require signer == auction.authority
/// - PDA validation ensures correct auction
/// - Proceeds only leave through the auction PDA signature

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::{AuctionShutdown, AuthorityTransferred, PriceOverridden, ProceedsWithdrawn};
use crate::state::Auction;

/// Accounts required for auction admin operations.
#[derive(Accounts)]
pub struct AuctionAdmin<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [AUCTION_SEED, auction.sale_mint.as_ref()],
        bump = auction.bump
    )]
    pub auction: Account<'info, Auction>,
}

/// Accounts required to move sale proceeds out of the auction.
#[derive(Accounts)]
pub struct WithdrawProceeds<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [AUCTION_SEED, auction.sale_mint.as_ref()],
        bump = auction.bump,
        has_one = proceeds_vault @ DistributionError::VaultMismatch
    )]
    pub auction: Account<'info, Auction>,

    #[account(mut)]
    pub proceeds_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == auction.payment_mint @ DistributionError::MintMismatch
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Override the current price.
///
/// Elapsed periods are settled first so the new price applies to the
/// period in progress; later periods adjust from it as usual.
///
/// # Arguments
/// * `ctx` - AuctionAdmin accounts context
/// * `new_price` - Ray-scaled price
pub fn update_price_manually_handler(ctx: Context<AuctionAdmin>, new_price: u128) -> Result<()> {
    let clock = Clock::get()?;
    let auction = &mut ctx.accounts.auction;
    auction.assert_authority(&ctx.accounts.authority.key())?;

    let old_price = auction.last_price;
    auction.override_price(clock.slot, new_price)?;

    msg!("Price overridden: {} -> {}", old_price, new_price);
    msg!("Admin: {}", ctx.accounts.authority.key());

    emit!(PriceOverridden {
        auction: auction.key(),
        old_price,
        new_price,
    });

    Ok(())
}

/// Permanently stop sales. Proceeds remain withdrawable.
pub fn emergency_shutdown_handler(ctx: Context<AuctionAdmin>) -> Result<()> {
    let clock = Clock::get()?;
    let auction = &mut ctx.accounts.auction;
    auction.assert_authority(&ctx.accounts.authority.key())?;

    auction.shutdown = true;

    msg!("Auction SHUT DOWN at slot {}", clock.slot);
    msg!("Admin: {}", ctx.accounts.authority.key());

    emit!(AuctionShutdown {
        auction: auction.key(),
        slot: clock.slot,
    });

    Ok(())
}

/// Transfer auction authority to a new address.
///
/// # Arguments
/// * `ctx` - AuctionAdmin accounts context
/// * `new_authority` - New admin pubkey, must be non-zero
pub fn transfer_auction_authority_handler(
    ctx: Context<AuctionAdmin>,
    new_authority: Pubkey,
) -> Result<()> {
    let auction = &mut ctx.accounts.auction;
    auction.assert_authority(&ctx.accounts.authority.key())?;
    require!(
        new_authority != Pubkey::default(),
        DistributionError::Unauthorized
    );

    let old_authority = auction.authority;
    auction.authority = new_authority;

    msg!("Auction authority transferred: {} -> {}", old_authority, new_authority);

    emit!(AuthorityTransferred {
        account: auction.key(),
        old_authority,
        new_authority,
    });

    Ok(())
}

/// Withdraw sale proceeds to `destination`.
///
/// # Arguments
/// * `ctx` - WithdrawProceeds accounts context
/// * `amount` - Amount of payment tokens to withdraw
pub fn withdraw_proceeds_handler(ctx: Context<WithdrawProceeds>, amount: u64) -> Result<()> {
    let auction = &ctx.accounts.auction;
    auction.assert_authority(&ctx.accounts.authority.key())?;

    require!(amount > 0, DistributionError::ZeroAmount);
    require!(
        ctx.accounts.proceeds_vault.amount >= amount,
        DistributionError::InsufficientBalance
    );

    let sale_mint_key = auction.sale_mint;
    let seeds = &[AUCTION_SEED, sale_mint_key.as_ref(), &[auction.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.proceeds_vault.to_account_info(),
        to: ctx.accounts.destination.to_account_info(),
        authority: ctx.accounts.auction.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)?;

    msg!("Withdrew {} proceeds to {}", amount, ctx.accounts.destination.key());

    emit!(ProceedsWithdrawn {
        auction: ctx.accounts.auction.key(),
        destination: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}
