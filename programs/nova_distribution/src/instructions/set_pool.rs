/// Set pool instruction handler.
///
/// Changes a pool's allocation weight. The pool is settled at its old
/// weight before the change takes effect.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::PoolWeightChanged;
use crate::instructions::update_pool::settle_pools;
use crate::state::{Farm, FarmPool};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct SetPool<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,

    /// An unknown `pool_id` derives an address no pool was created at, so
    /// loading it fails with `AccountNotInitialized`.
    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump,
        has_one = farm @ DistributionError::FarmMismatch
    )]
    pub pool: Account<'info, FarmPool>,
}

/// Reweigh pool `pool_id` to `alloc_points`.
///
/// # Arguments
/// * `ctx` - SetPool accounts context
/// * `pool_id` - Index of the pool
/// * `alloc_points` - New weight, zero stops emissions to the pool
/// * `with_mass_update` - Settle every pool first (all pools in
///   `remaining_accounts`, index order)
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetPool<'info>>,
    pool_id: u64,
    alloc_points: u64,
    with_mass_update: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts
        .farm
        .assert_authority(&ctx.accounts.authority.key())?;

    if with_mass_update {
        settle_pools(
            &ctx.accounts.farm,
            ctx.remaining_accounts,
            clock.slot,
            Some(ctx.accounts.pool.key()),
        )?;
    }

    let farm = &mut ctx.accounts.farm;
    let pool = &mut ctx.accounts.pool;
    let old_alloc_points = pool.set_alloc_points(farm, alloc_points, clock.slot)?;

    msg!(
        "Pool {} weight: {} -> {} (total {})",
        pool_id,
        old_alloc_points,
        alloc_points,
        farm.total_alloc_points
    );

    emit!(PoolWeightChanged {
        farm: farm.key(),
        index: pool_id,
        old_alloc_points,
        new_alloc_points: alloc_points,
        total_alloc_points: farm.total_alloc_points,
    });

    Ok(())
}
