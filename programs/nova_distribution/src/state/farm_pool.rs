use anchor_lang::prelude::*;

use crate::constants::ACC_REWARD_PRECISION;
use crate::error::DistributionError;
use crate::math;
use crate::state::{Farm, UserStake};

/// One staking pool of a [`Farm`]. Pools are append-only; `index` is the
/// pool id.
#[account]
#[derive(Default, Debug)]
pub struct FarmPool {
    pub farm: Pubkey,
    pub staked_mint: Pubkey,
    pub staked_vault: Pubkey,

    pub index: u64,
    pub alloc_points: u64,
    pub last_reward_slot: u64,
    /// Reward per staked unit, scaled by `ACC_REWARD_PRECISION`.
    pub acc_reward_per_share: u128,

    pub total_staked: u64,
    pub staker_count: u64,

    pub vault_bump: u8,
    pub bump: u8,
}

impl FarmPool {
    pub const LEN: usize = 8
        + (32 * 3)
        + (8 * 3)
        + 16
        + (8 * 2)
        + 2;

    /// Accumulator value after catching up to `slot`, without mutating.
    pub fn projected_acc_reward_per_share(&self, farm: &Farm, slot: u64) -> Result<u128> {
        if slot <= self.last_reward_slot || self.total_staked == 0 {
            return Ok(self.acc_reward_per_share);
        }

        let reward = farm.pool_reward(self.alloc_points, self.last_reward_slot, slot)?;
        let increment = math::mul_div(
            reward,
            ACC_REWARD_PRECISION,
            self.total_staked as u128,
            math::Rounding::Down,
        )?;
        self.acc_reward_per_share
            .checked_add(increment)
            .ok_or_else(|| error!(DistributionError::MathOverflow))
    }

    /// Brings the accumulator current. An empty pool only moves
    /// `last_reward_slot`, so nothing accrues for slots without stakers.
    pub fn update(&mut self, farm: &Farm, slot: u64) -> Result<()> {
        if slot <= self.last_reward_slot {
            return Ok(());
        }
        self.acc_reward_per_share = self.projected_acc_reward_per_share(farm, slot)?;
        self.last_reward_slot = slot;
        Ok(())
    }

    /// Settles the pool at its current weight, then moves it to
    /// `alloc_points`. Returns the previous weight.
    pub fn set_alloc_points(&mut self, farm: &mut Farm, alloc_points: u64, slot: u64) -> Result<u64> {
        self.update(farm, slot)?;
        let old_alloc_points = self.alloc_points;
        farm.reweigh(old_alloc_points, alloc_points)?;
        self.alloc_points = alloc_points;
        Ok(old_alloc_points)
    }

    /// Checks that this pool belongs at `position` of a mass settlement of
    /// `farm`. Every pool the settlement writes must be `writable`.
    pub fn assert_set_member(&self, farm: &Pubkey, position: usize, writable: bool) -> Result<()> {
        require_keys_eq!(self.farm, *farm, DistributionError::FarmMismatch);
        require!(self.index == position as u64, DistributionError::InvalidPool);
        require!(writable, DistributionError::InvalidPool);
        Ok(())
    }

    pub fn pending_reward(&self, farm: &Farm, user: &UserStake, slot: u64) -> Result<u64> {
        user.pending_reward(self.projected_acc_reward_per_share(farm, slot)?)
    }

    /// Settles the pool and adds `amount` to the user's stake. Returns the
    /// reward owed to the user for their previous stake.
    pub fn deposit(
        &mut self,
        farm: &Farm,
        user: &mut UserStake,
        amount: u64,
        slot: u64,
    ) -> Result<u64> {
        self.update(farm, slot)?;

        let reward = if user.is_active() {
            user.pending_reward(self.acc_reward_per_share)?
        } else {
            0
        };

        if amount > 0 {
            if !user.is_active() {
                self.staker_count = self.staker_count.saturating_add(1);
            }
            user.amount = user
                .amount
                .checked_add(amount)
                .ok_or(DistributionError::MathOverflow)?;
            self.total_staked = self
                .total_staked
                .checked_add(amount)
                .ok_or(DistributionError::MathOverflow)?;
        }
        user.sync_reward_debt(self.acc_reward_per_share)?;

        Ok(reward)
    }

    /// Settles the pool and removes `amount` from the user's stake. Returns
    /// the reward owed to the user.
    pub fn withdraw(
        &mut self,
        farm: &Farm,
        user: &mut UserStake,
        amount: u64,
        slot: u64,
    ) -> Result<u64> {
        require!(user.amount >= amount, DistributionError::InsufficientStake);

        self.update(farm, slot)?;
        let reward = user.pending_reward(self.acc_reward_per_share)?;

        if amount > 0 {
            user.amount -= amount;
            self.total_staked = self
                .total_staked
                .checked_sub(amount)
                .ok_or(DistributionError::MathOverflow)?;
            if !user.is_active() {
                self.staker_count = self.staker_count.saturating_sub(1);
            }
        }
        user.sync_reward_debt(self.acc_reward_per_share)?;

        Ok(reward)
    }

    /// Returns the whole stake without rewards. Returns the amount released.
    pub fn emergency_withdraw(&mut self, user: &mut UserStake) -> Result<u64> {
        let amount = user.amount;
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(DistributionError::MathOverflow)?;
        if amount > 0 {
            self.staker_count = self.staker_count.saturating_sub(1);
        }
        user.amount = 0;
        user.reward_debt = 0;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;
    const START: u64 = 1_000;

    fn farm(bonus_end_slot: u64) -> Farm {
        Farm {
            reward_per_slot: 100 * UNIT,
            start_slot: START,
            bonus_end_slot,
            bonus_multiplier: 2,
            total_alloc_points: 100,
            pool_count: 2,
            ..Default::default()
        }
    }

    fn pool(farm: &Farm, index: u64, alloc_points: u64, slot: u64) -> FarmPool {
        FarmPool {
            index,
            alloc_points,
            last_reward_slot: farm.first_reward_slot(slot),
            ..Default::default()
        }
    }

    fn stake(pool: &mut FarmPool, farm: &Farm, amount: u64, slot: u64) -> UserStake {
        let mut user = UserStake::default();
        assert_eq!(pool.deposit(farm, &mut user, amount, slot).unwrap(), 0);
        user
    }

    #[test]
    fn test_rewards_split_by_pool_weight_and_stake() {
        let farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);
        let mut pool1 = pool(&farm, 1, 40, 900);

        let alice = stake(&mut pool0, &farm, 4_000 * UNIT, 990);
        let bob0 = stake(&mut pool0, &farm, 6_000 * UNIT, 991);
        let bob1 = stake(&mut pool1, &farm, 10_000 * UNIT, 992);

        // nothing accrues before the start slot
        assert_eq!(pool0.pending_reward(&farm, &alice, 999).unwrap(), 0);
        assert_eq!(pool1.pending_reward(&farm, &bob1, 999).unwrap(), 0);

        // 40 bonus slots at 2x and 100 per slot: 4800 to pool 0, 3200 to pool 1
        let a = pool0.pending_reward(&farm, &alice, START + 40).unwrap();
        let b = pool0.pending_reward(&farm, &bob0, START + 40).unwrap();
        let c = pool1.pending_reward(&farm, &bob1, START + 40).unwrap();
        assert_eq!(a, 1_920 * UNIT);
        assert_eq!(b, 2_880 * UNIT);
        assert_eq!(c, 3_200 * UNIT);
        assert_eq!((a + b) * 40 / 60, c);

        // per-slot deltas
        let a2 = pool0.pending_reward(&farm, &alice, START + 41).unwrap();
        let b2 = pool0.pending_reward(&farm, &bob0, START + 41).unwrap();
        let c2 = pool1.pending_reward(&farm, &bob1, START + 41).unwrap();
        assert_eq!(a2 - a, 48 * UNIT);
        assert_eq!(b2 - b, 72 * UNIT);
        assert_eq!(c2 - c, 80 * UNIT);
    }

    #[test]
    fn test_withdraw_returns_principal_and_reward() {
        let farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);
        let mut alice = stake(&mut pool0, &farm, 4_000 * UNIT, 990);
        let mut bob = stake(&mut pool0, &farm, 6_000 * UNIT, 991);

        let reward = pool0
            .withdraw(&farm, &mut alice, 4_000 * UNIT, START + 41)
            .unwrap();
        assert_eq!(reward, 1_968 * UNIT);
        assert_eq!(alice.amount, 0);
        assert_eq!(alice.reward_debt, 0);
        assert_eq!(pool0.pending_reward(&farm, &alice, START + 500).unwrap(), 0);
        assert_eq!(pool0.staker_count, 1);

        // bob now earns the whole pool share
        let reward = pool0
            .withdraw(&farm, &mut bob, 6_000 * UNIT, START + 42)
            .unwrap();
        assert_eq!(reward, 2_952 * UNIT + 120 * UNIT);
        assert_eq!(pool0.total_staked, 0);
        assert_eq!(pool0.staker_count, 0);
    }

    #[test]
    fn test_withdraw_more_than_staked_fails() {
        let farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);
        let mut alice = stake(&mut pool0, &farm, 10 * UNIT, 990);
        assert_eq!(
            pool0
                .withdraw(&farm, &mut alice, 11 * UNIT, START + 5)
                .unwrap_err(),
            DistributionError::InsufficientStake.into()
        );
        assert_eq!(alice.amount, 10 * UNIT);
    }

    #[test]
    fn test_no_bonus_after_bonus_end() {
        let farm = farm(START);
        let mut pool0 = pool(&farm, 0, 60, 900);
        let alice = stake(&mut pool0, &farm, 4_000 * UNIT, 990);

        let r40 = pool0.pending_reward(&farm, &alice, START + 40).unwrap();
        let r41 = pool0.pending_reward(&farm, &alice, START + 41).unwrap();
        assert_eq!(r40, 2_400 * UNIT);
        assert_eq!(r41 - r40, 60 * UNIT);
    }

    #[test]
    fn test_empty_pool_does_not_accrue() {
        let farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);

        pool0.update(&farm, START + 50).unwrap();
        assert_eq!(pool0.acc_reward_per_share, 0);
        assert_eq!(pool0.last_reward_slot, START + 50);

        // a late staker is not credited for the empty slots
        let alice = stake(&mut pool0, &farm, 1_000 * UNIT, START + 50);
        assert_eq!(pool0.pending_reward(&farm, &alice, START + 50).unwrap(), 0);
        assert_eq!(
            pool0.pending_reward(&farm, &alice, START + 51).unwrap(),
            120 * UNIT
        );
    }

    #[test]
    fn test_update_is_idempotent() {
        let farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);
        stake(&mut pool0, &farm, 1_000 * UNIT, 990);

        pool0.update(&farm, START + 10).unwrap();
        let acc = pool0.acc_reward_per_share;
        pool0.update(&farm, START + 10).unwrap();
        pool0.update(&farm, START + 5).unwrap();
        assert_eq!(pool0.acc_reward_per_share, acc);
        assert_eq!(pool0.last_reward_slot, START + 10);
    }

    #[test]
    fn test_deposit_pays_pending_first() {
        let farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);
        let mut alice = stake(&mut pool0, &farm, 1_000 * UNIT, 990);

        let reward = pool0
            .deposit(&farm, &mut alice, 1_000 * UNIT, START + 10)
            .unwrap();
        assert_eq!(reward, 1_200 * UNIT);
        assert_eq!(alice.amount, 2_000 * UNIT);
        assert_eq!(pool0.pending_reward(&farm, &alice, START + 10).unwrap(), 0);

        // harvest with a zero deposit
        let reward = pool0.deposit(&farm, &mut alice, 0, START + 11).unwrap();
        assert_eq!(reward, 120 * UNIT);
        assert_eq!(pool0.staker_count, 1);
    }

    #[test]
    fn test_reweigh_settles_at_old_weight() {
        let mut farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);
        let alice = stake(&mut pool0, &farm, 1_000 * UNIT, 990);

        // 40 bonus slots at 200 per slot, 60% weight
        assert_eq!(
            pool0.pending_reward(&farm, &alice, START + 40).unwrap(),
            4_800 * UNIT
        );

        let old = pool0.set_alloc_points(&mut farm, 20, START + 40).unwrap();
        assert_eq!(old, 60);
        assert_eq!(pool0.alloc_points, 20);
        assert_eq!(farm.total_alloc_points, 60);
        assert_eq!(pool0.last_reward_slot, START + 40);

        // accrued rewards keep the old weight
        let before = pool0.pending_reward(&farm, &alice, START + 40).unwrap();
        assert_eq!(before, 4_800 * UNIT);

        // afterwards the pool earns 20 of 60 points
        let after = pool0.pending_reward(&farm, &alice, START + 41).unwrap();
        assert_eq!(after - before, 66_666_666_666);
    }

    #[test]
    fn test_zero_weight_stops_accrual() {
        let mut farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);
        let alice = stake(&mut pool0, &farm, 1_000 * UNIT, 990);

        pool0.set_alloc_points(&mut farm, 0, START + 10).unwrap();
        assert_eq!(farm.total_alloc_points, 40);
        let frozen = pool0.pending_reward(&farm, &alice, START + 10).unwrap();
        assert_eq!(frozen, 1_200 * UNIT);
        assert_eq!(
            pool0.pending_reward(&farm, &alice, START + 500).unwrap(),
            frozen
        );
    }

    #[test]
    fn test_settlement_set_membership() {
        let farm_key = Pubkey::new_unique();
        let member = |index| FarmPool {
            farm: farm_key,
            index,
            ..Default::default()
        };

        assert!(member(0).assert_set_member(&farm_key, 0, true).is_ok());
        assert!(member(1).assert_set_member(&farm_key, 1, true).is_ok());

        // swapped order
        assert_eq!(
            member(1).assert_set_member(&farm_key, 0, true).unwrap_err(),
            DistributionError::InvalidPool.into()
        );
        // read-only
        assert_eq!(
            member(0).assert_set_member(&farm_key, 0, false).unwrap_err(),
            DistributionError::InvalidPool.into()
        );
        // pool of another farm
        assert_eq!(
            member(0)
                .assert_set_member(&Pubkey::new_unique(), 0, true)
                .unwrap_err(),
            DistributionError::FarmMismatch.into()
        );
    }

    #[test]
    fn test_emergency_withdraw_forfeits_reward() {
        let farm = farm(START + 100_000);
        let mut pool0 = pool(&farm, 0, 60, 900);
        let mut alice = stake(&mut pool0, &farm, 1_000 * UNIT, 990);

        assert_eq!(pool0.emergency_withdraw(&mut alice).unwrap(), 1_000 * UNIT);
        assert_eq!(alice.amount, 0);
        assert_eq!(pool0.total_staked, 0);
        assert_eq!(pool0.staker_count, 0);
        assert_eq!(pool0.pending_reward(&farm, &alice, START + 10).unwrap(), 0);
    }
}
