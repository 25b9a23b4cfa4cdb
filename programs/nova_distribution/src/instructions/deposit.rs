/// Deposit instruction handler.
///
/// Stakes tokens into a farm pool, paying out rewards earned so far.
///
/// ## Security Guarantees
/// - User stake PDA is bound to (pool, owner)
/// - Staked tokens only move into the pool's own vault
/// - Rewards never exceed the reward vault balance

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::Deposited;
use crate::state::{Farm, FarmPool, UserStake};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Deposit<'info> {
    #[account(mut)]
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

    /// Created on the first deposit.
    #[account(
        init_if_needed,
        payer = user,
        space = UserStake::LEN,
        seeds = [USER_STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_stake: Account<'info, UserStake>,

    #[account(
        mut,
        constraint = user_token_account.mint == pool.staked_mint @ DistributionError::MintMismatch,
        constraint = user_token_account.owner == user.key() @ DistributionError::InvalidStakeOwner
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
    pub system_program: Program<'info, System>,
}

/// Pays `owed` reward from the reward vault, capped at its balance.
/// Returns the amount transferred.
pub fn pay_reward<'info>(
    farm: &mut Account<'info, Farm>,
    user_stake: &mut UserStake,
    reward_vault: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    owed: u64,
) -> Result<u64> {
    let paid = farm.record_payout(owed, reward_vault.amount)?;
    if paid < owed {
        msg!("Reward vault short: owed {}, paying {}", owed, paid);
    }
    if paid == 0 {
        return Ok(0);
    }

    user_stake.total_reward_claimed = user_stake
        .total_reward_claimed
        .checked_add(paid)
        .ok_or(DistributionError::MathOverflow)?;

    let reward_mint_key = farm.reward_mint;
    let seeds = &[FARM_SEED, reward_mint_key.as_ref(), &[farm.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: reward_vault.to_account_info(),
        to: destination.to_account_info(),
        authority: farm.to_account_info(),
    };
    let cpi_ctx =
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, paid)?;

    Ok(paid)
}

/// Deposit `amount` staked tokens into pool `pool_id`.
///
/// Pending rewards are paid first; `amount == 0` only harvests.
///
/// # Arguments
/// * `ctx` - Deposit accounts context
/// * `pool_id` - Index of the pool
/// * `amount` - Staked tokens to add
pub fn handler(ctx: Context<Deposit>, pool_id: u64, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let user_key = ctx.accounts.user.key();
    let pool_key = ctx.accounts.pool.key();

    let user_stake = &mut ctx.accounts.user_stake;
    if user_stake.owner == Pubkey::default() {
        user_stake.owner = user_key;
        user_stake.pool = pool_key;
        user_stake.bump = ctx.bumps.user_stake;
    }
    require_keys_eq!(user_stake.owner, user_key, DistributionError::InvalidStakeOwner);
    require_keys_eq!(user_stake.pool, pool_key, DistributionError::StakePoolMismatch);

    let owed = ctx
        .accounts
        .pool
        .deposit(&ctx.accounts.farm, user_stake, amount, clock.slot)?;

    let reward_paid = pay_reward(
        &mut ctx.accounts.farm,
        &mut ctx.accounts.user_stake,
        &ctx.accounts.reward_vault,
        &ctx.accounts.user_reward_account,
        &ctx.accounts.token_program,
        owed,
    )?;

    if amount > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.user_token_account.to_account_info(),
            to: ctx.accounts.staked_vault.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;
    }

    msg!("Deposited {} into pool {}", amount, pool_id);
    msg!("Reward paid: {}", reward_paid);
    msg!("User stake: {}", ctx.accounts.user_stake.amount);

    emit!(Deposited {
        pool: pool_key,
        user: user_key,
        amount,
        reward_paid,
    });

    Ok(())
}
