use anchor_lang::prelude::*;

use crate::error::DistributionError;
use crate::math;

/// Liquidity mining program: emits `reward_per_slot` of `reward_mint`
/// across all [`FarmPool`](super::FarmPool)s in proportion to their
/// allocation points.
#[account]
#[derive(Default, Debug)]
pub struct Farm {
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_vault: Pubkey,
    /// Pool migration hook, `Pubkey::default()` when unset.
    pub migrator: Pubkey,

    pub reward_per_slot: u64,
    pub start_slot: u64,
    pub bonus_end_slot: u64,
    pub bonus_multiplier: u64,

    pub total_alloc_points: u64,
    pub pool_count: u64,
    pub total_reward_paid: u64,

    pub created_at: i64,

    pub reward_vault_bump: u8,
    pub bump: u8,
}

impl Farm {
    pub const LEN: usize = 8
        + (32 * 4)
        + (8 * 4)
        + (8 * 3)
        + 8
        + 2;

    pub fn assert_authority(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.authority, DistributionError::Unauthorized);
        Ok(())
    }

    pub fn has_migrator(&self) -> bool {
        self.migrator != Pubkey::default()
    }

    pub fn reward_multiplier(&self, from: u64, to: u64) -> Result<u128> {
        math::reward_multiplier(from, to, self.bonus_end_slot, self.bonus_multiplier)
    }

    /// Reward owed to a pool with `alloc_points` for slots `[from, to)`.
    pub fn pool_reward(&self, alloc_points: u64, from: u64, to: u64) -> Result<u128> {
        if self.total_alloc_points == 0 {
            return Ok(0);
        }
        let emission = self
            .reward_multiplier(from, to)?
            .checked_mul(self.reward_per_slot as u128)
            .ok_or(DistributionError::MathOverflow)?;
        math::mul_div(
            emission,
            alloc_points as u128,
            self.total_alloc_points as u128,
            math::Rounding::Down,
        )
    }

    /// Slot a pool created at `slot` starts accruing from.
    pub fn first_reward_slot(&self, slot: u64) -> u64 {
        slot.max(self.start_slot)
    }

    pub fn add_alloc_points(&mut self, alloc_points: u64) -> Result<u64> {
        self.total_alloc_points = self
            .total_alloc_points
            .checked_add(alloc_points)
            .ok_or(DistributionError::MathOverflow)?;
        let index = self.pool_count;
        self.pool_count = self
            .pool_count
            .checked_add(1)
            .ok_or(DistributionError::MathOverflow)?;
        Ok(index)
    }

    pub fn reweigh(&mut self, old_points: u64, new_points: u64) -> Result<()> {
        self.total_alloc_points = self
            .total_alloc_points
            .checked_sub(old_points)
            .ok_or(DistributionError::MathOverflow)?
            .checked_add(new_points)
            .ok_or(DistributionError::MathOverflow)?;
        Ok(())
    }

    /// A mass settlement must be handed every pool of the farm.
    pub fn assert_pool_set_len(&self, len: usize) -> Result<()> {
        require!(
            len as u64 == self.pool_count,
            DistributionError::IncompletePoolSet
        );
        Ok(())
    }

    /// Records a reward payout capped at the reward vault balance and
    /// returns the amount actually paid. Any shortfall is forfeited.
    pub fn record_payout(&mut self, owed: u64, vault_balance: u64) -> Result<u64> {
        let paid = owed.min(vault_balance);
        self.total_reward_paid = self
            .total_reward_paid
            .checked_add(paid)
            .ok_or(DistributionError::MathOverflow)?;
        Ok(paid)
    }
}
