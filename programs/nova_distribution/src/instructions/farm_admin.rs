/// Farm admin instruction handlers.
///
/// ## Security Guarantees
/// - All admin functions require signer == farm.authority
/// - Reward withdrawals leave pool accounting untouched

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::{AuthorityTransferred, MigratorSet, RewardWithdrawn};
use crate::state::Farm;

#[derive(Accounts)]
pub struct FarmAdmin<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump
    )]
    pub farm: Account<'info, Farm>,
}

#[derive(Accounts)]
pub struct WithdrawReward<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FARM_SEED, farm.reward_mint.as_ref()],
        bump = farm.bump,
        has_one = reward_vault @ DistributionError::VaultMismatch
    )]
    pub farm: Account<'info, Farm>,

    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == farm.reward_mint @ DistributionError::MintMismatch
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Record the pool migration hook. `Pubkey::default()` clears it.
pub fn set_migrator_handler(ctx: Context<FarmAdmin>, migrator: Pubkey) -> Result<()> {
    let farm = &mut ctx.accounts.farm;
    farm.assert_authority(&ctx.accounts.authority.key())?;

    farm.migrator = migrator;

    msg!("Migrator set to {}", migrator);

    emit!(MigratorSet {
        farm: farm.key(),
        migrator,
    });

    Ok(())
}

/// Transfer farm authority to a new address.
///
/// # Arguments
/// * `ctx` - FarmAdmin accounts context
/// * `new_authority` - New admin pubkey, must be non-zero
pub fn transfer_farm_authority_handler(
    ctx: Context<FarmAdmin>,
    new_authority: Pubkey,
) -> Result<()> {
    let farm = &mut ctx.accounts.farm;
    farm.assert_authority(&ctx.accounts.authority.key())?;
    require!(
        new_authority != Pubkey::default(),
        DistributionError::Unauthorized
    );

    let old_authority = farm.authority;
    farm.authority = new_authority;

    msg!("Farm authority transferred: {} -> {}", old_authority, new_authority);

    emit!(AuthorityTransferred {
        account: farm.key(),
        old_authority,
        new_authority,
    });

    Ok(())
}

/// Reclaim reward tokens from the reward vault.
///
/// Pool accumulators are not adjusted, so stakers whose rewards can no
/// longer be covered receive the capped payout.
///
/// # Arguments
/// * `ctx` - WithdrawReward accounts context
/// * `amount` - Reward tokens to withdraw
pub fn withdraw_reward_handler(ctx: Context<WithdrawReward>, amount: u64) -> Result<()> {
    let farm = &ctx.accounts.farm;
    farm.assert_authority(&ctx.accounts.authority.key())?;

    require!(amount > 0, DistributionError::ZeroAmount);
    require!(
        ctx.accounts.reward_vault.amount >= amount,
        DistributionError::InsufficientBalance
    );

    let reward_mint_key = farm.reward_mint;
    let seeds = &[FARM_SEED, reward_mint_key.as_ref(), &[farm.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_vault.to_account_info(),
        to: ctx.accounts.destination.to_account_info(),
        authority: ctx.accounts.farm.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)?;

    msg!("Withdrew {} reward tokens to {}", amount, ctx.accounts.destination.key());

    emit!(RewardWithdrawn {
        farm: ctx.accounts.farm.key(),
        destination: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}
