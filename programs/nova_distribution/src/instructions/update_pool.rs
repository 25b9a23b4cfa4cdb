/// Pool settlement instruction handlers.
///
/// Permissionless cranks that bring pool reward accumulators up to the
/// current slot.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::DistributionError;
use crate::state::{Farm, FarmPool};

#[derive(Accounts)]
pub struct UpdatePool<'info> {
    #[account(seeds = [FARM_SEED, farm.reward_mint.as_ref()], bump = farm.bump)]
    pub farm: Account<'info, Farm>,

    #[account(
        mut,
        seeds = [FARM_POOL_SEED, farm.key().as_ref(), &pool.index.to_le_bytes()],
        bump = pool.bump,
        has_one = farm @ DistributionError::FarmMismatch
    )]
    pub pool: Account<'info, FarmPool>,
}

/// Every pool of `farm` is passed in `remaining_accounts`, writable and in
/// index order.
#[derive(Accounts)]
pub struct MassUpdatePools<'info> {
    #[account(seeds = [FARM_SEED, farm.reward_mint.as_ref()], bump = farm.bump)]
    pub farm: Account<'info, Farm>,
}

/// Settles every pool of `farm` found in `pools` up to `slot`.
///
/// `pools` must hold all `farm.pool_count` pools in index order. The pool
/// keyed `skip` is checked but left for the caller to settle through its
/// own typed account.
pub fn settle_pools<'info>(
    farm: &Account<'info, Farm>,
    pools: &'info [AccountInfo<'info>],
    slot: u64,
    skip: Option<Pubkey>,
) -> Result<()> {
    farm.assert_pool_set_len(pools.len())?;

    for (index, info) in pools.iter().enumerate() {
        let mut pool = Account::<FarmPool>::try_from(info)?;
        let skipped = Some(info.key()) == skip;
        pool.assert_set_member(&farm.key(), index, skipped || info.is_writable)?;
        if skipped {
            continue;
        }

        pool.update(farm, slot)?;
        pool.exit(&crate::ID)?;
    }

    Ok(())
}

/// Settle a single pool.
pub fn update_pool_handler(ctx: Context<UpdatePool>) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool;
    pool.update(&ctx.accounts.farm, clock.slot)?;

    msg!(
        "Pool {} settled at slot {}: acc reward per share {}",
        pool.index,
        pool.last_reward_slot,
        pool.acc_reward_per_share
    );

    Ok(())
}

/// Settle every pool of the farm.
pub fn mass_update_pools_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, MassUpdatePools<'info>>,
) -> Result<()> {
    let clock = Clock::get()?;
    settle_pools(&ctx.accounts.farm, ctx.remaining_accounts, clock.slot, None)?;

    msg!(
        "Settled {} pools at slot {}",
        ctx.accounts.farm.pool_count,
        clock.slot
    );

    Ok(())
}
