/// Vault funding instruction handlers.
///
/// Tops up the auction sale vault or the farm reward vault.
///
/// ## Security Guarantees
/// - Vault validation ensures the stored PDA is credited
/// - Mint validation prevents wrong token deposits
/// - Anyone can fund (no admin restriction)

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::VaultFunded;
use crate::state::{Auction, Farm};

/// Accounts required for funding the sale vault.
#[derive(Accounts)]
pub struct FundAuction<'info> {
    /// The funder (anyone can fund).
    pub funder: Signer<'info>,

    #[account(
        seeds = [AUCTION_SEED, auction.sale_mint.as_ref()],
        bump = auction.bump,
        has_one = sale_vault @ DistributionError::VaultMismatch
    )]
    pub auction: Account<'info, Auction>,

    /// Funder's sale token account.
    #[account(
        mut,
        constraint = funder_token_account.mint == auction.sale_mint @ DistributionError::MintMismatch,
        constraint = funder_token_account.owner == funder.key()
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub sale_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Accounts required for funding the reward vault.
#[derive(Accounts)]
pub struct FundRewards<'info> {
    /// The funder (anyone can fund).
    pub funder: Signer<'info>,

    #[account(
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = reward_vault @ DistributionError::VaultMismatch
    )]
    pub farm: Account<'info, Farm>,

    /// Funder's reward token account.
    #[account(
        mut,
        constraint = funder_token_account.mint == farm.reward_mint @ DistributionError::MintMismatch,
        constraint = funder_token_account.owner == funder.key()
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

fn transfer_to_vault<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    vault: &mut Account<'info, TokenAccount>,
    funder: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, DistributionError::ZeroAmount);

    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: vault.to_account_info(),
        authority: funder.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    // Reload vault to get updated balance
    vault.reload()?;

    msg!("Vault {} funded with {} tokens", vault.key(), amount);
    msg!("New vault balance: {}", vault.amount);
    msg!("Funder: {}", funder.key());

    emit!(VaultFunded {
        vault: vault.key(),
        funder: funder.key(),
        amount,
        balance: vault.amount,
    });

    Ok(())
}

/// Fund the auction with sale tokens.
///
/// # Arguments
/// * `ctx` - FundAuction accounts context
/// * `amount` - Amount of sale tokens to deposit
pub fn fund_auction_handler(ctx: Context<FundAuction>, amount: u64) -> Result<()> {
    let accounts = ctx.accounts;
    transfer_to_vault(
        &accounts.token_program,
        &accounts.funder_token_account,
        &mut accounts.sale_vault,
        &accounts.funder,
        amount,
    )
}

/// Fund the farm with reward tokens.
///
/// # Arguments
/// * `ctx` - FundRewards accounts context
/// * `amount` - Amount of reward tokens to deposit
pub fn fund_rewards_handler(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    let accounts = ctx.accounts;
    transfer_to_vault(
        &accounts.token_program,
        &accounts.funder_token_account,
        &mut accounts.reward_vault,
        &accounts.funder,
        amount,
    )
}
