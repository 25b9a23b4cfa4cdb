//! Fixed-point helpers shared by the auction and the farm.
//!
//! Products of two 27-decimal values overflow `u128`, so every `a * b / c`
//! goes through a 256-bit intermediate.

use anchor_lang::prelude::*;
use ethnum::U256;

use crate::constants::RAY;
use crate::error::DistributionError;

/// Rounding direction for [`mul_div`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Computes `a * b / denominator` without intermediate overflow.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    require!(denominator != 0, DistributionError::DivisionByZero);

    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(DistributionError::MathOverflow)?;
    let denominator = U256::from(denominator);
    let mut quotient = product / denominator;
    if rounding == Rounding::Up && product % denominator != U256::ZERO {
        quotient += U256::ONE;
    }

    require!(
        quotient <= U256::from(u128::MAX),
        DistributionError::MathOverflow
    );
    Ok(quotient.as_u128())
}

/// Next-period price given the previous price and the units sold during the
/// period that just ended.
///
/// The target is half of `token_per_period`. Selling above target raises the
/// price linearly, up to +100% when the whole period sells out. Selling below
/// target lowers it by the relative shortfall divided by `sensitivity` (a ray
/// value), so with a sensitivity of 2.0 an empty period halves the price.
///
/// Ratios are floored; the final product is rounded up, so a positive price
/// never decays below one unit.
pub fn adjusted_price(
    last_price: u128,
    token_sold: u128,
    token_per_period: u128,
    sensitivity: u128,
) -> Result<u128> {
    let target = token_per_period / 2;
    require!(target > 0, DistributionError::InvalidTokenPerPeriod);

    if token_sold == target {
        return Ok(last_price);
    }

    let factor = if token_sold > target {
        let excess = (token_sold - target).min(target);
        RAY.checked_add(mul_div(excess, RAY, target, Rounding::Down)?)
            .ok_or(DistributionError::MathOverflow)?
    } else {
        let shortfall = mul_div(target - token_sold, RAY, target, Rounding::Down)?;
        let decrease = mul_div(shortfall, RAY, sensitivity, Rounding::Down)?;
        RAY.saturating_sub(decrease)
    };

    mul_div(last_price, factor, RAY, Rounding::Up)
}

/// Raises a ray-scaled `base` to the power `exp` by repeated squaring.
/// Every step rounds down.
pub fn rpow(base: u128, exp: u64) -> Result<u128> {
    let mut result = RAY;
    let mut base = base;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_div(result, base, RAY, Rounding::Down)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = mul_div(base, base, RAY, Rounding::Down)?;
        }
    }
    Ok(result)
}

/// Whole sale-token units a payment buys at `price` (rounded down).
pub fn tokens_for_payment(payment: u64, price: u128) -> Result<u128> {
    require!(price > 0, DistributionError::InvalidPrice);
    mul_div(payment as u128, RAY, price, Rounding::Down)
}

/// Payment owed for `tokens` units at `price` (rounded up, in the seller's
/// favour).
pub fn payment_for_tokens(tokens: u64, price: u128) -> Result<u64> {
    let cost = mul_div(tokens as u128, price, RAY, Rounding::Up)?;
    u64::try_from(cost).map_err(|_| error!(DistributionError::ConversionOverflow))
}

/// Number of reward slots in `[from, to)`, counting slots before
/// `bonus_end` `bonus_multiplier` times.
pub fn reward_multiplier(from: u64, to: u64, bonus_end: u64, bonus_multiplier: u64) -> Result<u128> {
    if to <= from {
        return Ok(0);
    }
    let (from, to, bonus_end) = (from as u128, to as u128, bonus_end as u128);
    let multiplier = bonus_multiplier as u128;

    let slots = if to <= bonus_end {
        (to - from) * multiplier
    } else if from >= bonus_end {
        to - from
    } else {
        (bonus_end - from) * multiplier + (to - bonus_end)
    };
    Ok(slots)
}
