use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

pub mod constants;
pub mod engine;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

use crate::constants::SALE_AUTHORITY_SEED;
use crate::error::SaleError;
use crate::state::SaleParams;

declare_id!("GgyRoa9CWcXN6mV9tgwxqV3wZWE1KSPG5ucBmAbw2NQX");

#[program]
pub mod token_sale {
    use super::*;

    pub fn initialize_sale(
        ctx: Context<InitializeSale>,
        recipient: Pubkey,
        params: SaleParams,
    ) -> Result<()> {
        instructions::initialize_sale::handle_initialize_sale(ctx, recipient, params)
    }

    pub fn initialize_schedule(
        ctx: Context<InitializeSchedule>,
        boundaries: Vec<i64>,
        caps: Vec<u64>,
    ) -> Result<()> {
        instructions::initialize_schedule::handle_initialize_schedule(ctx, boundaries, caps)
    }

    pub fn initialize_monthly_schedule(
        ctx: Context<InitializeMonthlySchedule>,
        start_ts: i64,
        caps: Vec<u64>,
    ) -> Result<()> {
        instructions::initialize_schedule::handle_initialize_monthly_schedule(ctx, start_ts, caps)
    }

    pub fn fund_reserve(ctx: Context<FundReserve>, amount: u64) -> Result<()> {
        instructions::fund_reserve::handle_fund_reserve(ctx, amount)
    }

    pub fn buy_tokens(ctx: Context<BuyTokens>, payment_amount: u64, supplied_ts: i64) -> Result<()> {
        instructions::buy_tokens::handle_buy_tokens(ctx, payment_amount, supplied_ts)
    }

    pub fn pause(ctx: Context<Pause>) -> Result<()> {
        instructions::pause::handle_pause(ctx)
    }

    pub fn resume(ctx: Context<Resume>) -> Result<()> {
        instructions::resume::handle_resume(ctx)
    }

    pub fn change_authority(ctx: Context<ChangeAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::change_authority::handle_change_authority(ctx, new_authority)
    }

    pub fn change_recipient(ctx: Context<ChangeRecipient>, new_recipient: Pubkey) -> Result<()> {
        instructions::change_recipient::handle_change_recipient(ctx, new_recipient)
    }

    pub fn update_token_price(ctx: Context<UpdateTokenPrice>, new_price_usd: u64) -> Result<()> {
        instructions::update_token_price::handle_update_token_price(ctx, new_price_usd)
    }

    pub fn update_wallet_purchase_limit(
        ctx: Context<UpdateWalletPurchaseLimit>,
        new_limit: u64,
    ) -> Result<()> {
        instructions::update_wallet_purchase_limit::handle_update_wallet_purchase_limit(
            ctx, new_limit,
        )
    }

    pub fn withdraw_native(ctx: Context<WithdrawNative>, amount: u64) -> Result<()> {
        instructions::withdraw_native::handle_withdraw_native(ctx, amount)
    }

    pub fn withdraw_tokens(ctx: Context<WithdrawTokens>, amount: u64) -> Result<()> {
        instructions::withdraw_tokens::handle_withdraw_tokens(ctx, amount)
    }

    /// Sends `amounts[i]` sale tokens to the i-th remaining account.
    /// Does not count against the release schedule.
    pub fn airdrop_tokens<'info>(
        ctx: Context<'_, '_, 'info, 'info, AirdropTokens<'info>>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        let cfg = &ctx.accounts.sale_config;
        let recipients = ctx.remaining_accounts;
        let total = engine::plan_airdrop(
            cfg,
            &ctx.accounts.authority.key(),
            &amounts,
            recipients.len(),
            ctx.accounts.vault.amount,
        )?;

        let vault_key = ctx.accounts.vault.key();
        let signer_seeds: &[&[&[u8]]] = &[&[SALE_AUTHORITY_SEED, &[cfg.sale_authority_bump]]];

        for (recipient, &amount) in recipients.iter().zip(amounts.iter()) {
            require!(recipient.is_writable, SaleError::InvalidTokenAccount);
            require_keys_neq!(recipient.key(), vault_key, SaleError::InvalidTokenAccount);
            require_keys_eq!(*recipient.owner, token::ID, SaleError::InvalidTokenAccount);

            let destination = {
                let data = recipient.try_borrow_data()?;
                TokenAccount::try_deserialize(&mut &data[..])
                    .map_err(|_| SaleError::InvalidTokenAccount)?
            };
            require_keys_eq!(destination.mint, cfg.token_mint, SaleError::InvalidTokenMint);

            token::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.vault.to_account_info(),
                        to: recipient.clone(),
                        authority: ctx.accounts.sale_authority.to_account_info(),
                    },
                    signer_seeds,
                ),
                amount,
            )?;

            emit!(AirdropItem {
                recipient: recipient.key(),
                amount,
            });
        }

        let recipient_count =
            u32::try_from(amounts.len()).map_err(|_| SaleError::MathOverflow)?;
        msg!("airdrop: {} recipients, {} tokens", recipient_count, total);

        emit!(AirdropCompleted {
            authority: cfg.authority,
            recipient_count,
            total_amount: total,
            vault_balance: ctx
                .accounts
                .vault
                .amount
                .checked_sub(total)
                .ok_or(SaleError::MathOverflow)?,
        });

        Ok(())
    }

    pub fn emit_sale_quote(ctx: Context<EmitSaleQuote>, supplied_ts: i64) -> Result<()> {
        instructions::emit_sale_quote::handle_emit_sale_quote(ctx, supplied_ts)
    }
}
