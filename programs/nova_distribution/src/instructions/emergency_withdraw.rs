/// Emergency withdraw instruction handler.
///
/// Returns the whole stake without touching the reward accumulator. Any
/// unpaid reward is forfeited.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::EmergencyWithdrawn;
use crate::state::{Farm, FarmPool, UserStake};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct EmergencyWithdraw<'info> {
    pub user: Signer<'info>,

    #[account(
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump,
        has_one = farm @ DistributionError::FarmMismatch,
        has_one = staked_vault @ DistributionError::VaultMismatch
    )]
    pub pool: Account<'info, FarmPool>,

    #[account(
        mut,
        seeds = [USER_STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        has_one = pool @ DistributionError::StakePoolMismatch,
        constraint = user_stake.owner == user.key() @ DistributionError::InvalidStakeOwner
    )]
    pub user_stake: Account<'info, UserStake>,

    #[account(
        mut,
        constraint = user_token_account.mint == pool.staked_mint @ DistributionError::MintMismatch
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub staked_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EmergencyWithdraw>, pool_id: u64) -> Result<()> {
    let amount = ctx
        .accounts
        .pool
        .emergency_withdraw(&mut ctx.accounts.user_stake)?;
    require!(amount > 0, DistributionError::ZeroAmount);

    let reward_mint_key = ctx.accounts.farm.reward_mint;
    let seeds = &[FARM_SEED, reward_mint_key.as_ref(), &[ctx.accounts.farm.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.staked_vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.farm.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)?;

    msg!("EMERGENCY withdraw of {} from pool {}", amount, pool_id);
    msg!("User: {}", ctx.accounts.user.key());

    emit!(EmergencyWithdrawn {
        pool: ctx.accounts.pool.key(),
        user: ctx.accounts.user.key(),
        amount,
    });

    Ok(())
}
