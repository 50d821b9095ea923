use anchor_lang::prelude::*;

use crate::constants::SALE_CONFIG_SEED;
use crate::state::SaleConfig;

pub fn handle_pause(ctx: Context<Pause>) -> Result<()> {
    let cfg = &mut ctx.accounts.sale_config;
    cfg.pause(&ctx.accounts.authority.key())?;
    emit!(SalePaused {
        authority: cfg.authority,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Pause<'info> {
    #[account(mut, seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,
    pub authority: Signer<'info>,
}

#[event]
pub struct SalePaused {
    pub authority: Pubkey,
}
