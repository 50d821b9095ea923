use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{SALE_AUTHORITY_SEED, SALE_CONFIG_SEED, VAULT_SEED};
use crate::error::SaleError;
use crate::state::SaleConfig;

// NOTE: `airdrop_tokens` handler logic lives in `src/lib.rs`; it walks
// `remaining_accounts`, which needs the `'info`-bound `Context` lifetimes.

#[derive(Accounts)]
pub struct AirdropTokens<'info> {
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

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct AirdropItem {
    pub recipient: Pubkey,
    pub amount: u64,
}

#[event]
pub struct AirdropCompleted {
    pub authority: Pubkey,
    pub recipient_count: u32,
    pub total_amount: u64,
    pub vault_balance: u64,
}
