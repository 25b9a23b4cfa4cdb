/// Update price instruction handler.
///
/// Permissionless crank that settles elapsed periods so the stored price
/// matches what the next buyer would pay.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::PriceUpdated;
use crate::state::Auction;

#[derive(Accounts)]
pub struct UpdatePrice<'info> {
    #[account(
        mut,
        seeds = [AUCTION_SEED, auction.sale_mint.as_ref()],
        bump = auction.bump
    )]
    pub auction: Account<'info, Auction>,
}

pub fn handler(ctx: Context<UpdatePrice>) -> Result<()> {
    let clock = Clock::get()?;
    let auction = &mut ctx.accounts.auction;

    if !auction.update_price(clock.slot)? {
        msg!("Price already current for period {}", auction.last_transacted_period);
        return Ok(());
    }

    msg!(
        "Price updated to {} for period {}",
        auction.last_price,
        auction.last_transacted_period
    );

    emit!(PriceUpdated {
        auction: auction.key(),
        period: auction.last_transacted_period,
        price: auction.last_price,
    });

    Ok(())
}
