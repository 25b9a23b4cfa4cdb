/// Withdraw instruction handler.
///
/// Returns staked tokens from a farm pool together with the reward earned.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::Withdrawn;
use crate::instructions::deposit::pay_reward;
use crate::state::{Farm, FarmPool, UserStake};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Withdraw<'info> {
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = reward_vault @ DistributionError::VaultMismatch
    )]
    pub farm: Account<'info, Farm>,

    /// An unknown `pool_id` derives an address no pool was created at, so
    /// loading it fails with `AccountNotInitialized`.
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

    #[account(
        mut,
        constraint = user_reward_account.mint == farm.reward_mint @ DistributionError::MintMismatch
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub staked_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Withdraw `amount` staked tokens from pool `pool_id`.
///
/// Pending rewards are paid alongside; `amount == 0` only harvests.
///
/// # Arguments
/// * `ctx` - Withdraw accounts context
/// * `pool_id` - Index of the pool
/// * `amount` - Staked tokens to return
///
/// # Errors
/// `InsufficientStake` if `amount` exceeds the user's stake.
pub fn handler(ctx: Context<Withdraw>, pool_id: u64, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    let owed = ctx.accounts.pool.withdraw(
        &ctx.accounts.farm,
        &mut ctx.accounts.user_stake,
        amount,
        clock.slot,
    )?;

    let reward_paid = pay_reward(
        &mut ctx.accounts.farm,
        &mut ctx.accounts.user_stake,
        &ctx.accounts.reward_vault,
        &ctx.accounts.user_reward_account,
        &ctx.accounts.token_program,
        owed,
    )?;

    if amount > 0 {
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
    }

    msg!("Withdrew {} from pool {}", amount, pool_id);
    msg!("Reward paid: {}", reward_paid);
    msg!("Remaining stake: {}", ctx.accounts.user_stake.amount);

    emit!(Withdrawn {
        pool: ctx.accounts.pool.key(),
        user: ctx.accounts.user.key(),
        amount,
        reward_paid,
    });

    Ok(())
}
