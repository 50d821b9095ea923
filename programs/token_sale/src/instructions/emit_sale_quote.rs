use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{RELEASE_SCHEDULE_SEED, SALE_CONFIG_SEED, VAULT_SEED};
use crate::state::{ReleaseSchedule, SaleConfig};

/// Emits what a purchase at `supplied_ts` would see. Mutates nothing.
pub fn handle_emit_sale_quote(ctx: Context<EmitSaleQuote>, supplied_ts: i64) -> Result<()> {
    let cfg = &ctx.accounts.sale_config;
    let schedule = &ctx.accounts.release_schedule;
    let (period_index, cumulative_unlocked_cap) = schedule.preview(supplied_ts)?;

    emit!(SaleQuote {
        supplied_ts,
        period_index,
        cumulative_unlocked_cap,
        total_purchased: schedule.total_purchased,
        remaining_unlocked: cumulative_unlocked_cap.saturating_sub(schedule.total_purchased),
        reserve_balance: ctx.accounts.vault.amount,
        token_price_usd: cfg.token_price_usd,
        paused: cfg.paused,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitSaleQuote<'info> {
    #[account(seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    #[account(seeds = [RELEASE_SCHEDULE_SEED], bump = release_schedule.bump)]
    pub release_schedule: Account<'info, ReleaseSchedule>,

    #[account(seeds = [VAULT_SEED, sale_config.key().as_ref()], bump)]
    pub vault: Account<'info, TokenAccount>,
}

#[event]
pub struct SaleQuote {
    pub supplied_ts: i64,
    pub period_index: u16,
    pub cumulative_unlocked_cap: u64,
    pub total_purchased: u64,
    pub remaining_unlocked: u64,
    pub reserve_balance: u64,
    pub token_price_usd: u64,
    pub paused: bool,
}
