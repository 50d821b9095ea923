use anchor_lang::prelude::*;

use crate::constants::SALE_CONFIG_SEED;
use crate::state::SaleConfig;

pub fn handle_resume(ctx: Context<Resume>) -> Result<()> {
    let cfg = &mut ctx.accounts.sale_config;
    cfg.resume(&ctx.accounts.authority.key())?;
    emit!(SaleResumed {
        authority: cfg.authority,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Resume<'info> {
    #[account(mut, seeds = [SALE_CONFIG_SEED], bump)]
    pub sale_config: Account<'info, SaleConfig>,
    pub authority: Signer<'info>,
}

#[event]
pub struct SaleResumed {
    pub authority: Pubkey,
}
