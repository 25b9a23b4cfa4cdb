/// Add pool instruction handler.
///
/// Registers a new staking pool with its own stake vault. Pool ids are
/// assigned sequentially and never reused.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::events::PoolAdded;
use crate::instructions::update_pool::settle_pools;
use crate::state::{Farm, FarmPool};

#[derive(Accounts)]
pub struct AddPool<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// Token staked in the new pool.
    pub staked_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = FarmPool::LEN,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &farm.pool_count.to_le_bytes()],
        bump
    )]
    pub pool: Account<'info, FarmPool>,

    /// Vault holding the pool's staked tokens.
    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = staked_mint,
        token::authority = farm
    )]
    pub staked_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Add a pool with `alloc_points` weight.
///
/// With `with_mass_update` every existing pool must be passed in
/// `remaining_accounts` and is settled before the total weight grows.
///
/// # Arguments
/// * `ctx` - AddPool accounts context
/// * `alloc_points` - Weight of the new pool
/// * `with_mass_update` - Settle existing pools first
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, AddPool<'info>>,
    alloc_points: u64,
    with_mass_update: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .farm
        .assert_authority(&ctx.accounts.authority.key())?;

    if with_mass_update {
        settle_pools(&ctx.accounts.farm, ctx.remaining_accounts, clock.slot, None)?;
    }

    let farm = &mut ctx.accounts.farm;
    let index = farm.add_alloc_points(alloc_points)?;

    let pool = &mut ctx.accounts.pool;
    pool.farm = farm.key();
    pool.staked_mint = ctx.accounts.staked_mint.key();
    pool.staked_vault = ctx.accounts.staked_vault.key();
    pool.index = index;
    pool.alloc_points = alloc_points;
    pool.last_reward_slot = farm.first_reward_slot(clock.slot);
    pool.acc_reward_per_share = 0;
    pool.total_staked = 0;
    pool.staker_count = 0;
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.staked_vault;

    msg!(
        "Pool {} added for mint {} with {} alloc points",
        index,
        pool.staked_mint,
        alloc_points
    );
    msg!("Total alloc points: {}", farm.total_alloc_points);

    emit!(PoolAdded {
        farm: farm.key(),
        pool: pool.key(),
        index,
        staked_mint: pool.staked_mint,
        alloc_points,
        total_alloc_points: farm.total_alloc_points,
    });

    Ok(())
}
