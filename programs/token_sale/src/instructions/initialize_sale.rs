use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use pyth_solana_receiver_sdk::price_update::get_feed_id_from_hex;

use crate::constants::{
    DEFAULT_MAX_PRICE_AGE_SECS, DEFAULT_MIN_PARTIAL_SIGNATURES, SALE_AUTHORITY_SEED,
    SALE_CONFIG_SEED, SOL_USD_FEED_ID, VAULT_SEED,
};
use crate::error::SaleError;
use crate::state::{SaleConfig, SaleParams};

pub fn handle_initialize_sale(
    ctx: Context<InitializeSale>,
    recipient: Pubkey,
    params: SaleParams,
) -> Result<()> {
    params.validate()?;
    require!(recipient != Pubkey::default(), SaleError::InvalidPubkey);
    require!(
        recipient != ctx.accounts.sale_authority.key(),
        SaleError::InvalidConfig
    );

    let price_feed_id = match params.price_feed_id {
        Some(id) => id,
        None => get_feed_id_from_hex(SOL_USD_FEED_ID)?,
    };

    let cfg = &mut ctx.accounts.sale_config;
    cfg.authority = ctx.accounts.authority.key();
    cfg.recipient = recipient;
    cfg.sale_authority = ctx.accounts.sale_authority.key();
    cfg.token_mint = ctx.accounts.mint.key();
    cfg.price_feed_id = price_feed_id;
    cfg.token_price_usd = params.token_price_usd;
    cfg.max_price_age_secs = params
        .max_price_age_secs
        .unwrap_or(DEFAULT_MAX_PRICE_AGE_SECS);
    cfg.max_confidence_bps = params.max_confidence_bps;
    cfg.min_partial_signatures = params
        .min_partial_signatures
        .unwrap_or(DEFAULT_MIN_PARTIAL_SIGNATURES);
    cfg.wallet_purchase_limit = params.wallet_purchase_limit;
    cfg.mint_decimals = ctx.accounts.mint.decimals;
    cfg.paused = false;
    cfg.sale_authority_bump = ctx.bumps.sale_authority;

    msg!(
        "sale initialized: mint={} price={} decimals={}",
        cfg.token_mint,
        cfg.token_price_usd,
        cfg.mint_decimals
    );

    emit!(SaleInitialized {
        authority: cfg.authority,
        recipient: cfg.recipient,
        token_mint: cfg.token_mint,
        vault: ctx.accounts.vault.key(),
        price_feed_id: cfg.price_feed_id,
        token_price_usd: cfg.token_price_usd,
        max_price_age_secs: cfg.max_price_age_secs,
        wallet_purchase_limit: cfg.wallet_purchase_limit,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeSale<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + SaleConfig::SIZE,
        seeds = [SALE_CONFIG_SEED],
        bump
    )]
    pub sale_config: Account<'info, SaleConfig>,

    /// Reserve PDA: signs vault transfers and holds withdrawable lamports.
    #[account(seeds = [SALE_AUTHORITY_SEED], bump)]
    pub sale_authority: SystemAccount<'info>,

    #[account(
        init,
        payer = authority,
        token::mint = mint,
        token::authority = sale_authority,
        seeds = [VAULT_SEED, sale_config.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct SaleInitialized {
    pub authority: Pubkey,
    pub recipient: Pubkey,
    pub token_mint: Pubkey,
    pub vault: Pubkey,
    pub price_feed_id: [u8; 32],
    pub token_price_usd: u64,
    pub max_price_age_secs: u64,
    pub wallet_purchase_limit: u64,
}
