use anchor_lang::prelude::*;

use crate::constants::SALE_CONFIG_SEED;
use crate::state::SaleConfig;

pub fn handle_update_token_price(ctx: Context<UpdateTokenPrice>, new_price_usd: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.sale_config;
    let old_price_usd = cfg.set_token_price(&ctx.accounts.authority.key(), new_price_usd)?;

    msg!("token price {} -> {}", old_price_usd, new_price_usd);
    emit!(TokenPriceUpdated {
        authority: cfg.authority,
        old_price_usd,
        new_price_usd,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateTokenPrice<'info> {
    #[account(mut, seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,

    pub authority: Signer<'info>,
}

#[event]
pub struct TokenPriceUpdated {
    pub authority: Pubkey,
    pub old_price_usd: u64,
    pub new_price_usd: u64,
}
