use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

use crate::constants::{
    RELEASE_SCHEDULE_SEED, SALE_AUTHORITY_SEED, SALE_CONFIG_SEED, VAULT_SEED, WALLET_PURCHASE_SEED,
};
use crate::engine::{self, PurchaseRequest, SaleLedger};
use crate::error::SaleError;
use crate::state::{ReleaseSchedule, SaleConfig, WalletPurchase};
use crate::utils::price::PriceRecord;

pub fn handle_buy_tokens(ctx: Context<BuyTokens>, payment_amount: u64, supplied_ts: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let update: &PriceUpdateV2 = &ctx.accounts.price_update;
    let record = PriceRecord::from(update);

    let request = PurchaseRequest {
        buyer: ctx.accounts.buyer.key(),
        payment_amount,
        supplied_ts,
        now,
    };

    let mut ledger = CpiSaleLedger {
        buyer: ctx.accounts.buyer.to_account_info(),
        recipient: ctx.accounts.recipient.to_account_info(),
        vault: ctx.accounts.vault.to_account_info(),
        buyer_token_account: ctx.accounts.buyer_token_account.to_account_info(),
        sale_authority: ctx.accounts.sale_authority.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
        vault_balance: ctx.accounts.vault.amount,
        sale_authority_bump: ctx.accounts.sale_config.sale_authority_bump,
    };

    ctx.accounts.wallet_purchase.bump = ctx.bumps.wallet_purchase;

    let receipt = engine::process_purchase(
        &ctx.accounts.sale_config,
        &mut ctx.accounts.release_schedule,
        &mut ctx.accounts.wallet_purchase,
        &mut ledger,
        &record,
        &request,
    )?;

    if receipt.periods_crossed > 0 {
        msg!(
            "release schedule advanced {} period(s), cap now {}",
            receipt.periods_crossed,
            receipt.new_cumulative_unlocked_cap
        );
    }
    msg!(
        "purchase: {} lamports -> {} tokens (usd {})",
        receipt.payment_amount,
        receipt.token_amount,
        receipt.usd_value
    );

    emit!(PurchaseCompleted {
        buyer: request.buyer,
        token_amount: receipt.token_amount,
        payment_amount: receipt.payment_amount,
        usd_value: receipt.usd_value,
        new_total_purchased: receipt.new_total_purchased,
        new_cumulative_unlocked_cap: receipt.new_cumulative_unlocked_cap,
        wallet_total_purchased: receipt.wallet_total_purchased,
    });

    Ok(())
}

/// Settles purchases through System Program and SPL Token CPIs. Tokens leave
/// the vault under the reserve PDA's signature.
struct CpiSaleLedger<'info> {
    buyer: AccountInfo<'info>,
    recipient: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    buyer_token_account: AccountInfo<'info>,
    sale_authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    vault_balance: u64,
    sale_authority_bump: u8,
}

impl<'info> SaleLedger for CpiSaleLedger<'info> {
    fn reserve_token_balance(&self) -> u64 {
        self.vault_balance
    }

    fn settle_purchase(&mut self, payment: u64, tokens: u64) -> Result<()> {
        system_program::transfer(
            CpiContext::new(
                self.system_program.clone(),
                system_program::Transfer {
                    from: self.buyer.clone(),
                    to: self.recipient.clone(),
                },
            ),
            payment,
        )?;

        let bump = [self.sale_authority_bump];
        let signer_seeds: &[&[&[u8]]] = &[&[SALE_AUTHORITY_SEED, &bump]];
        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: self.buyer_token_account.clone(),
                    authority: self.sale_authority.clone(),
                },
                signer_seeds,
            ),
            tokens,
        )?;

        self.vault_balance = self
            .vault_balance
            .checked_sub(tokens)
            .ok_or(SaleError::InsufficientReserve)?;
        Ok(())
    }
}

#[derive(Accounts)]
pub struct BuyTokens<'info> {
    #[account(seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Box<Account<'info, SaleConfig>>,

    #[account(mut, seeds = [RELEASE_SCHEDULE_SEED], bump = release_schedule.bump)]
    pub release_schedule: Box<Account<'info, ReleaseSchedule>>,

    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + WalletPurchase::SIZE,
        seeds = [WALLET_PURCHASE_SEED, buyer.key().as_ref()],
        bump
    )]
    pub wallet_purchase: Box<Account<'info, WalletPurchase>>,

    #[account(seeds = [SALE_AUTHORITY_SEED], bump = sale_config.sale_authority_bump)]
    pub sale_authority: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, sale_config.key().as_ref()],
        bump,
        constraint = vault.mint == sale_config.token_mint @ SaleError::InvalidTokenMint,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = buyer_token_account.mint == sale_config.token_mint @ SaleError::InvalidTokenMint,
        constraint = buyer_token_account.owner == buyer.key() @ SaleError::InvalidTokenAccount,
    )]
    pub buyer_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = sale_config.recipient @ SaleError::WrongRecipient)]
    pub recipient: SystemAccount<'info>,

    pub price_update: Account<'info, PriceUpdateV2>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct PurchaseCompleted {
    pub buyer: Pubkey,
    pub token_amount: u64,
    pub payment_amount: u64,
    /// 10^-9 USD.
    pub usd_value: u64,
    pub new_total_purchased: u64,
    pub new_cumulative_unlocked_cap: u64,
    pub wallet_total_purchased: u64,
}
