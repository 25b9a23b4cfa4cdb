/// Initialize farm instruction handler.
///
/// Creates the reward farm and its reward vault. Pools are added afterwards
/// with `add_pool`.
///
/// ## Security Guarantees
/// - Reward vault is a PDA owned by the farm
/// - Reward mint is locked to farm state permanently

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::DistributionError;
use crate::events::FarmInitialized;
use crate::state::Farm;

/// Emission schedule of a farm.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FarmParams {
    /// Reward units emitted per slot across all pools, before the bonus.
    pub reward_per_slot: u64,
    /// First slot that earns rewards.
    pub start_slot: u64,
    /// Slots before this one earn `bonus_multiplier` times the base rate.
    pub bonus_end_slot: u64,
    pub bonus_multiplier: u64,
}

impl FarmParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.bonus_end_slot >= self.start_slot,
            DistributionError::InvalidBonusWindow
        );
        require!(
            self.bonus_multiplier >= 1 && self.bonus_multiplier <= MAX_BONUS_MULTIPLIER,
            DistributionError::InvalidBonusMultiplier
        );
        Ok(())
    }
}

#[derive(Accounts)]
pub struct InitializeFarm<'info> {
    /// The admin authority that will control the farm.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The farm account to be created, one per reward mint.
    #[account(
        init,
        payer = authority,
        space = Farm::LEN,
        seeds = [FARM_SEED, reward_mint.key().as_ref()],
        bump
    )]
    pub farm: Account<'info, Farm>,

    pub reward_mint: Account<'info, Mint>,

    /// Vault holding undistributed rewards.
    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, farm.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = farm
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new reward farm.
///
/// # Arguments
/// * `ctx` - InitializeFarm accounts context
/// * `params` - Emission schedule
pub fn handler(ctx: Context<InitializeFarm>, params: FarmParams) -> Result<()> {
    params.validate()?;

    let clock = Clock::get()?;
    let farm = &mut ctx.accounts.farm;

    farm.authority = ctx.accounts.authority.key();
    farm.reward_mint = ctx.accounts.reward_mint.key();
    farm.reward_vault = ctx.accounts.reward_vault.key();
    farm.migrator = Pubkey::default();

    farm.reward_per_slot = params.reward_per_slot;
    farm.start_slot = params.start_slot;
    farm.bonus_end_slot = params.bonus_end_slot;
    farm.bonus_multiplier = params.bonus_multiplier;

    farm.total_alloc_points = 0;
    farm.pool_count = 0;
    farm.total_reward_paid = 0;
    farm.created_at = clock.unix_timestamp;

    farm.bump = ctx.bumps.farm;
    farm.reward_vault_bump = ctx.bumps.reward_vault;

    msg!("Nova farm initialized");
    msg!("Admin: {}", farm.authority);
    msg!("Reward mint: {}", farm.reward_mint);
    msg!(
        "Reward per slot: {}, start slot: {}, bonus {}x until slot {}",
        params.reward_per_slot,
        params.start_slot,
        params.bonus_multiplier,
        params.bonus_end_slot
    );

    emit!(FarmInitialized {
        farm: farm.key(),
        authority: farm.authority,
        reward_mint: farm.reward_mint,
        reward_per_slot: params.reward_per_slot,
        start_slot: params.start_slot,
        bonus_end_slot: params.bonus_end_slot,
        bonus_multiplier: params.bonus_multiplier,
    });

    Ok(())
}
