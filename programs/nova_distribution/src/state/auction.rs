use anchor_lang::prelude::*;

use crate::constants::RAY;
use crate::error::DistributionError;
use crate::math;

/// Periodic dynamic-price sale of `sale_mint` against `payment_mint`.
///
/// Each period of `slots_per_period` slots can sell up to `token_per_period`
/// units. When a period ends the price is re-derived from how much of the
/// period target (half the allocation) was sold.
#[account]
#[derive(Default, Debug)]
pub struct Auction {
    pub authority: Pubkey,
    pub sale_mint: Pubkey,
    pub payment_mint: Pubkey,
    pub sale_vault: Pubkey,
    pub proceeds_vault: Pubkey,

    pub start_slot: u64,
    pub slots_per_period: u64,
    pub token_per_period: u64,
    /// Ray-scaled dampening applied to downward price moves.
    pub sensitivity: u128,

    /// Ray-scaled price, payment units per sale token unit.
    pub last_price: u128,
    pub last_transacted_period: u64,
    pub last_token_sold_in_period: u64,
    pub shutdown: bool,

    pub total_sold: u64,
    pub total_proceeds: u64,
    pub created_at: i64,

    pub sale_vault_bump: u8,
    pub proceeds_vault_bump: u8,
    pub bump: u8,
}

/// Outcome of a purchase: units delivered and payment charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fill {
    pub tokens: u64,
    pub cost: u64,
    pub price: u128,
}

impl Auction {
    pub const LEN: usize = 8
        + (32 * 5)
        + (8 * 3)
        + 16
        + 16
        + (8 * 2)
        + 1
        + (8 * 3)
        + 3;

    pub fn assert_authority(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.authority, DistributionError::Unauthorized);
        Ok(())
    }

    pub fn period_since_start(&self, slot: u64) -> Result<u64> {
        require!(slot >= self.start_slot, DistributionError::NotStarted);
        require!(self.slots_per_period > 0, DistributionError::InvalidPeriodLength);
        Ok((slot - self.start_slot) / self.slots_per_period)
    }

    pub fn adjusted_price(&self, last_price: u128, token_sold: u128) -> Result<u128> {
        math::adjusted_price(
            last_price,
            token_sold,
            self.token_per_period as u128,
            self.sensitivity,
        )
    }

    /// Price in effect during `period`. Only the first elapsed period saw
    /// sales; every further idle period compounds one empty-period decay,
    /// applied in a single `rpow` step. The result never drops below one
    /// unit.
    fn price_for_period(&self, period: u64) -> Result<u128> {
        if period <= self.last_transacted_period {
            return Ok(self.last_price);
        }

        let price = self.adjusted_price(self.last_price, self.last_token_sold_in_period as u128)?;
        let idle = period - self.last_transacted_period - 1;
        if idle == 0 {
            return Ok(price);
        }

        // An empty period applied to a unit price is the decay factor itself.
        let decay = self.adjusted_price(RAY, 0)?;
        let decayed = math::mul_div(price, math::rpow(decay, idle)?, RAY, math::Rounding::Up)?;
        Ok(decayed.max(1))
    }

    /// Price a purchase at `slot` would pay, without settling.
    pub fn current_price(&self, slot: u64) -> Result<u128> {
        let period = self.period_since_start(slot)?;
        self.price_for_period(period)
    }

    /// Settles elapsed periods. Returns `true` if the period advanced.
    pub fn update_price(&mut self, slot: u64) -> Result<bool> {
        let period = self.period_since_start(slot)?;
        if period == self.last_transacted_period {
            return Ok(false);
        }

        self.last_price = self.price_for_period(period)?;
        self.last_token_sold_in_period = 0;
        self.last_transacted_period = period;
        Ok(true)
    }

    /// Units still for sale in the current (settled) period.
    pub fn remaining_in_period(&self) -> u64 {
        self.token_per_period
            .saturating_sub(self.last_token_sold_in_period)
    }

    /// Settles the price and records a purchase of up to `payment` worth of
    /// tokens, limited by period capacity and by `vault_balance`.
    ///
    /// A clamped purchase is charged only for the units delivered.
    pub fn fill_order(&mut self, slot: u64, payment: u64, vault_balance: u64) -> Result<Fill> {
        self.period_since_start(slot)?;
        require!(!self.shutdown, DistributionError::ShutDown);
        require!(payment > 0, DistributionError::ZeroAmount);

        self.update_price(slot)?;

        let available = self.remaining_in_period().min(vault_balance);
        require!(available > 0, DistributionError::SoldOut);

        let price = self.last_price;
        let requested = math::tokens_for_payment(payment, price)?;
        require!(requested > 0, DistributionError::ZeroAmount);

        let fill = if requested > available as u128 {
            Fill {
                tokens: available,
                cost: math::payment_for_tokens(available, price)?,
                price,
            }
        } else {
            Fill {
                tokens: requested as u64,
                cost: payment,
                price,
            }
        };

        self.last_token_sold_in_period = self
            .last_token_sold_in_period
            .checked_add(fill.tokens)
            .ok_or(DistributionError::MathOverflow)?;
        self.total_sold = self
            .total_sold
            .checked_add(fill.tokens)
            .ok_or(DistributionError::MathOverflow)?;
        self.total_proceeds = self
            .total_proceeds
            .checked_add(fill.cost)
            .ok_or(DistributionError::MathOverflow)?;

        Ok(fill)
    }

    /// Overwrites the price. Sale counters and the settled period are left
    /// untouched.
    pub fn set_price(&mut self, new_price: u128) -> Result<()> {
        require!(new_price > 0, DistributionError::InvalidPrice);
        self.last_price = new_price;
        Ok(())
    }

    /// Admin price override: catches up elapsed periods (once started) so
    /// the new price applies to the current period, then overwrites it.
    pub fn override_price(&mut self, slot: u64, new_price: u128) -> Result<()> {
        if slot >= self.start_slot {
            self.update_price(slot)?;
        }
        self.set_price(new_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_SENSITIVITY, MAX_SENSITIVITY};

    const UNIT: u64 = 1_000_000_000;
    const START: u64 = 100;

    fn auction(initial_price: u128) -> Auction {
        Auction {
            start_slot: START,
            slots_per_period: 5,
            token_per_period: 600 * UNIT,
            sensitivity: DEFAULT_SENSITIVITY,
            last_price: initial_price,
            ..Default::default()
        }
    }

    fn buy(auction: &mut Auction, slot: u64, payment: u64) -> Fill {
        auction.fill_order(slot, payment, u64::MAX).unwrap()
    }

    #[test]
    fn test_period_since_start() {
        let auction = auction(RAY);
        assert_eq!(
            auction.period_since_start(START - 1).unwrap_err(),
            DistributionError::NotStarted.into()
        );
        assert_eq!(auction.period_since_start(START).unwrap(), 0);
        assert_eq!(auction.period_since_start(START + 4).unwrap(), 0);
        assert_eq!(auction.period_since_start(START + 5).unwrap(), 1);
        assert_eq!(auction.period_since_start(START + 54).unwrap(), 10);
    }

    #[test]
    fn test_current_price_same_period() {
        let auction = auction(10 * RAY);
        assert_eq!(auction.current_price(START).unwrap(), 10 * RAY);
    }

    #[test]
    fn test_current_price_after_empty_period() {
        let auction = auction(10 * RAY);
        assert_eq!(auction.current_price(START + 5).unwrap(), 5 * RAY);
    }

    #[test]
    fn test_current_price_after_small_sale() {
        let mut auction = auction(RAY);
        assert_eq!(buy(&mut auction, START + 1, 100 * UNIT).tokens, 100 * UNIT);

        let expected = 666_666_666_666_666_666_666_666_667;
        assert_eq!(auction.current_price(START + 5).unwrap(), expected);
        // idempotent read
        assert_eq!(auction.current_price(START + 5).unwrap(), expected);
        // two more empty periods compound the decay
        assert_eq!(
            auction.current_price(START + 15).unwrap(),
            166_666_666_666_666_666_666_666_667
        );
    }

    #[test]
    fn test_update_price_noop_within_period() {
        let mut auction = auction(RAY);
        buy(&mut auction, START + 1, 100 * UNIT);
        buy(&mut auction, START + 2, 100 * UNIT);
        assert_eq!(auction.last_token_sold_in_period, 200 * UNIT);

        assert!(!auction.update_price(START + 3).unwrap());
        assert_eq!(auction.last_price, RAY);
        assert_eq!(auction.last_token_sold_in_period, 200 * UNIT);
        assert_eq!(auction.last_transacted_period, 0);
    }

    #[test]
    fn test_update_price_one_period() {
        let mut auction = auction(RAY);
        buy(&mut auction, START + 1, 100 * UNIT);

        assert!(auction.update_price(START + 6).unwrap());
        assert_eq!(auction.last_price, 666_666_666_666_666_666_666_666_667);
        assert_eq!(auction.last_token_sold_in_period, 0);
        assert_eq!(auction.last_transacted_period, 1);
    }

    #[test]
    fn test_update_price_several_periods_matches_projection() {
        let mut auction = auction(RAY);
        buy(&mut auction, START + 1, 100 * UNIT);

        let projected = auction.current_price(START + 16).unwrap();
        auction.update_price(START + 16).unwrap();
        assert_eq!(auction.last_price, projected);
        assert_eq!(auction.last_price, 166_666_666_666_666_666_666_666_667);
        assert_eq!(auction.last_token_sold_in_period, 0);
        assert_eq!(auction.last_transacted_period, 3);
    }

    #[test]
    fn test_long_idle_decays_to_one_unit() {
        let mut auction = auction(RAY);
        auction.update_price(START + 5 * 1_000_000).unwrap();
        assert_eq!(auction.last_price, 1);
        assert_eq!(auction.last_transacted_period, 1_000_000);
    }

    #[test]
    fn test_idle_decay_settles_in_one_step() {
        // slowest allowed decay, a trillion idle periods
        let mut auction = Auction {
            sensitivity: MAX_SENSITIVITY,
            ..auction(1_000 * RAY)
        };
        assert_eq!(
            auction.current_price(START + 5).unwrap(),
            990 * RAY
        );
        assert_eq!(
            auction.current_price(START + 15).unwrap(),
            970_299 * RAY / 1_000
        );

        auction.update_price(START + 5 * 1_000_000_000_000).unwrap();
        assert_eq!(auction.last_price, 1);
        assert_eq!(auction.last_transacted_period, 1_000_000_000_000);

        // the admin override stays usable after the long idle stretch
        auction
            .override_price(START + 5 * 2_000_000_000_000, RAY)
            .unwrap();
        assert_eq!(auction.last_price, RAY);
        assert_eq!(auction.last_transacted_period, 2_000_000_000_000);
    }

    #[test]
    fn test_buy_before_start_fails() {
        let mut auction = auction(RAY);
        assert_eq!(
            auction.fill_order(START - 1, UNIT, u64::MAX).unwrap_err(),
            DistributionError::NotStarted.into()
        );
    }

    #[test]
    fn test_buy_clamped_to_period_capacity() {
        // 1 payment unit buys 1000 tokens, but only 600 are for sale
        let mut auction = auction(RAY / 1000);
        let fill = buy(&mut auction, START, UNIT);
        assert_eq!(fill.tokens, 600 * UNIT);
        assert_eq!(fill.cost, 600_000_000);
        assert_eq!(auction.remaining_in_period(), 0);

        assert_eq!(
            auction.fill_order(START + 1, UNIT, u64::MAX).unwrap_err(),
            DistributionError::SoldOut.into()
        );
    }

    #[test]
    fn test_buy_clamped_to_vault_balance() {
        let mut auction = auction(RAY / 100);
        let fill = auction.fill_order(START, UNIT, 50 * UNIT).unwrap();
        assert_eq!(fill.tokens, 50 * UNIT);
        assert_eq!(fill.cost, UNIT / 2);

        assert_eq!(
            auction.fill_order(START, UNIT, 0).unwrap_err(),
            DistributionError::SoldOut.into()
        );
    }

    #[test]
    fn test_multiple_buyers_share_period() {
        let mut auction = auction(RAY / 100);
        assert_eq!(buy(&mut auction, START, UNIT).tokens, 100 * UNIT);
        assert_eq!(buy(&mut auction, START + 1, 2 * UNIT).tokens, 200 * UNIT);
        assert_eq!(auction.total_proceeds, 3 * UNIT);
        assert_eq!(auction.last_token_sold_in_period, 300 * UNIT);
    }

    #[test]
    fn test_price_path_decreasing() {
        let mut auction = auction(RAY / 100);

        // Period 0: exactly on target, price unchanged
        buy(&mut auction, START, UNIT);
        buy(&mut auction, START + 1, 2 * UNIT);
        assert_eq!(auction.current_price(START + 5).unwrap(), RAY / 100);

        // Period 1: half the target => -25%
        assert_eq!(buy(&mut auction, START + 5, UNIT / 2).tokens, 50 * UNIT);
        assert_eq!(buy(&mut auction, START + 6, UNIT).tokens, 100 * UNIT);
        assert_eq!(
            auction.current_price(START + 10).unwrap(),
            7_500_000_000_000_000_000_000_000
        );

        // Period 2
        assert_eq!(buy(&mut auction, START + 10, UNIT).tokens, 133_333_333_333);
        assert_eq!(
            auction.current_price(START + 15).unwrap(),
            5_416_666_666_662_500_000_000_001
        );

        // Period 4, after an empty period 3
        assert_eq!(
            auction.current_price(START + 20).unwrap(),
            2_708_333_333_331_250_000_000_001
        );
        assert_eq!(buy(&mut auction, START + 20, UNIT).tokens, 369_230_769_231);
        assert_eq!(auction.total_proceeds, 55 * UNIT / 10 + UNIT);
    }

    #[test]
    fn test_price_path_increasing() {
        let mut auction = auction(RAY / 100);

        assert_eq!(buy(&mut auction, START, 6 * UNIT).tokens, 600 * UNIT);
        // sold out => price doubles
        assert_eq!(buy(&mut auction, START + 5, 12 * UNIT).tokens, 600 * UNIT);
        assert_eq!(auction.last_price, RAY / 50);
        assert_eq!(buy(&mut auction, START + 10, 12 * UNIT).tokens, 300 * UNIT);
        assert_eq!(auction.last_price, RAY / 25);
        // on target => unchanged
        assert_eq!(buy(&mut auction, START + 15, 14 * UNIT).tokens, 350 * UNIT);
        assert_eq!(auction.last_price, RAY / 25);

        assert_eq!(auction.total_sold, 1850 * UNIT);
        assert_eq!(auction.total_proceeds, 44 * UNIT);
    }

    #[test]
    fn test_shutdown_blocks_purchases() {
        let mut auction = auction(RAY / 100);
        buy(&mut auction, START, 6 * UNIT);
        auction.shutdown = true;
        assert_eq!(
            auction.fill_order(START + 4, 6 * UNIT, u64::MAX).unwrap_err(),
            DistributionError::ShutDown.into()
        );
    }

    #[test]
    fn test_manual_price_override() {
        let mut auction = auction(RAY / 100);
        assert_eq!(buy(&mut auction, START + 1, UNIT).tokens, 100 * UNIT);
        assert_eq!(
            auction.current_price(START + 20).unwrap(),
            833_333_333_333_333_333_333_334
        );

        auction.override_price(START + 20, RAY / 100).unwrap();
        assert_eq!(auction.current_price(START + 20).unwrap(), RAY / 100);
        assert_eq!(auction.last_transacted_period, 4);
        assert_eq!(buy(&mut auction, START + 21, UNIT).tokens, 100 * UNIT);

        assert_eq!(
            auction.override_price(START + 21, 0).unwrap_err(),
            DistributionError::InvalidPrice.into()
        );
    }

    #[test]
    fn test_set_price_keeps_counters() {
        let mut auction = auction(RAY);
        buy(&mut auction, START + 1, 100 * UNIT);
        auction.set_price(2 * RAY).unwrap();
        assert_eq!(auction.last_price, 2 * RAY);
        assert_eq!(auction.last_token_sold_in_period, 100 * UNIT);
        assert_eq!(auction.last_transacted_period, 0);
    }

    #[test]
    fn test_override_before_start() {
        let mut auction = auction(RAY);
        auction.override_price(START - 10, 3 * RAY).unwrap();
        assert_eq!(auction.last_price, 3 * RAY);
        assert_eq!(auction.current_price(START).unwrap(), 3 * RAY);
    }

    #[test]
    fn test_authority_gate() {
        let authority = Pubkey::new_unique();
        let auction = Auction {
            authority,
            ..auction(RAY)
        };
        assert!(auction.assert_authority(&authority).is_ok());
        assert_eq!(
            auction.assert_authority(&Pubkey::new_unique()).unwrap_err(),
            DistributionError::Unauthorized.into()
        );
    }
}
