use anchor_lang::prelude::*;

use crate::constants::ACC_REWARD_PRECISION;
use crate::error::DistributionError;
use crate::math;

/// A staker's position in one [`FarmPool`](super::FarmPool).
#[account]
#[derive(Default, Debug)]
pub struct UserStake {
    pub owner: Pubkey,
    pub pool: Pubkey,

    pub amount: u64,
    /// `amount * acc_reward_per_share` at the last interaction.
    pub reward_debt: u128,
    pub total_reward_claimed: u64,

    pub bump: u8,
}

impl UserStake {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 16 + 8 + 1;

    fn accrued(&self, acc_reward_per_share: u128) -> Result<u128> {
        math::mul_div(
            self.amount as u128,
            acc_reward_per_share,
            ACC_REWARD_PRECISION,
            math::Rounding::Down,
        )
    }

    /// Reward earned since the last interaction at the given accumulator.
    pub fn pending_reward(&self, acc_reward_per_share: u128) -> Result<u64> {
        let pending = self
            .accrued(acc_reward_per_share)?
            .checked_sub(self.reward_debt)
            .ok_or(DistributionError::MathOverflow)?;
        u64::try_from(pending).map_err(|_| error!(DistributionError::ConversionOverflow))
    }

    pub fn sync_reward_debt(&mut self, acc_reward_per_share: u128) -> Result<()> {
        self.reward_debt = self.accrued(acc_reward_per_share)?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.amount > 0
    }
}
