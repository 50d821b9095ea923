use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{SALE_CONFIG_SEED, VAULT_SEED};
use crate::error::SaleError;
use crate::state::SaleConfig;

pub fn handle_fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
    require!(amount > 0, SaleError::InvalidAmount);

    let cfg = &ctx.accounts.sale_config;
    cfg.assert_authority(&ctx.accounts.authority.key())?;

    require_keys_eq!(
        ctx.accounts.authority_token_account.mint,
        cfg.token_mint,
        SaleError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.authority_token_account.owner,
        ctx.accounts.authority.key(),
        SaleError::InvalidTokenAccount
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.authority_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.vault.reload()?;

    emit!(ReserveFunded {
        authority: ctx.accounts.authority.key(),
        amount,
        vault_balance: ctx.accounts.vault.amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct FundReserve<'info> {
    #[account(seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    #[account(
        mut,
        seeds = [VAULT_SEED, sale_config.key().as_ref()],
        bump,
        constraint = vault.mint == sale_config.token_mint @ SaleError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority_token_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct ReserveFunded {
    pub authority: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
}
