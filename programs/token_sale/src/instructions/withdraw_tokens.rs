use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{SALE_AUTHORITY_SEED, SALE_CONFIG_SEED, VAULT_SEED};
use crate::engine;
use crate::error::SaleError;
use crate::state::SaleConfig;

/// Withdraws unsold tokens. Allowed at any time, paused or not.
pub fn handle_withdraw_tokens(ctx: Context<WithdrawTokens>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.sale_config;
    engine::check_token_withdrawal(
        cfg,
        &ctx.accounts.authority.key(),
        amount,
        ctx.accounts.vault.amount,
    )?;

    require_keys_eq!(
        ctx.accounts.authority_destination.owner,
        ctx.accounts.authority.key(),
        SaleError::InvalidTokenAccount
    );

    let signer_seeds: &[&[&[u8]]] = &[&[SALE_AUTHORITY_SEED, &[cfg.sale_authority_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.authority_destination.to_account_info(),
                authority: ctx.accounts.sale_authority.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    ctx.accounts.vault.reload()?;

    emit!(TokensWithdrawn {
        authority: cfg.authority,
        amount,
        vault_balance: ctx.accounts.vault.amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawTokens<'info> {
    #[account(seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    #[account(seeds = [SALE_AUTHORITY_SEED], bump = sale_config.sale_authority_bump)]
    pub sale_authority: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, sale_config.key().as_ref()],
        bump,
        constraint = vault.mint == sale_config.token_mint @ SaleError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = authority_destination.mint == sale_config.token_mint @ SaleError::InvalidTokenMint,
    )]
    pub authority_destination: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensWithdrawn {
    pub authority: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
}
